use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::conversion::ConversionError;
use crate::i18n::{keys, Translator};
use crate::pump::InputError;
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일/콘솔 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    /// 단위 문자열 해석 오류
    #[error("unit conversion error: {0}")]
    Conversion(#[from] ConversionError),
    /// 입력 범위 오류
    #[error("invalid input: {0}")]
    Input(#[from] InputError),
    /// JSON 출력 오류
    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),
    /// 로깅 설정 오류
    #[error("logging setup error: {0}")]
    Logging(#[from] tracing_subscriber::filter::ParseError),
}

/// 대화형 CLI의 메인 루프를 실행한다.
pub fn run(config: &mut Config, tr: &mut Translator) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::PumpPower => ui_cli::handle_pump_power(tr, config)?,
            MenuChoice::Settings => {
                if ui_cli::handle_settings(tr, config)? {
                    config.save()?;
                    println!("{}", tr.t(keys::SETTINGS_SAVED));
                }
            }
            MenuChoice::Exit => {
                println!("{}", tr.t(keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
