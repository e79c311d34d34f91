use tracing_subscriber::filter::ParseError;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry};

/// 바이너리에서 한 번 호출해 tracing 구독자를 설치한다.
///
/// 기본은 이 크레이트의 info 이상만 stderr로 출력하며 `RUST_LOG`로 덮어쓸 수 있다.
pub fn setup_tracing(debug: bool) -> Result<(), ParseError> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let filter_level = if debug {
        "pump_power_calculator=debug"
    } else {
        "pump_power_calculator=info"
    };

    let filter = EnvFilter::from_default_env().add_directive(filter_level.parse()?);

    let subscriber = Registry::default().with(stderr_layer).with(filter);

    // 이미 설치된 경우(테스트 등)는 기존 구독자를 유지한다.
    let _ = tracing::subscriber::set_global_default(subscriber);

    Ok(())
}
