//! 회전식(원심) 펌프 동력 계산 모듈.
//! SI로 정규화된 입력으로 수력 동력과 축 동력을 구한다.

pub mod power;

pub use power::{
    compute_pump_power, hydraulic_power_kw, kw_to_hp, shaft_power_kw, InputAdjustment,
    InputError, PumpPowerInput, PumpPowerResult, SiInputs, G_STANDARD, HP_PER_KW,
};
