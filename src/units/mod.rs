//! 단위 정의 및 SI 환산 모듈 모음.
//!
//! 모든 계수 표는 상수이며 실행 중 변경되지 않는다.

pub mod density;
pub mod efficiency;
pub mod flow;
pub mod head;

pub use density::{density_from_sg, FluidDescriptor, DENSITY_FLOOR_KG_M3, RHO_WATER_4C};
pub use efficiency::{
    convert_efficiency, efficiency_to_fraction, EfficiencyUnit, EFFICIENCY_MAX, EFFICIENCY_MIN,
};
pub use flow::{convert_flow, flow_from_si, flow_to_si, FlowUnit};
pub use head::{convert_head, head_to_si, HeadUnit};
