use serde::{Deserialize, Serialize};

/// 비중의 기준이 되는 4°C 물의 밀도(kg/m³).
pub const RHO_WATER_4C: f64 = 1000.0;
/// 비중 하한. 0 또는 음수 비중은 이 값으로 올린다.
pub const SPECIFIC_GRAVITY_FLOOR: f64 = 1e-6;
/// 밀도 하한(kg/m³). 비중 하한과 같은 값이다.
pub const DENSITY_FLOOR_KG_M3: f64 = SPECIFIC_GRAVITY_FLOOR * RHO_WATER_4C;

/// 비중을 밀도(kg/m³)로 환산한다. `max(1e-6, sg) * 1000`.
pub fn density_from_sg(sg: f64) -> f64 {
    sg.max(SPECIFIC_GRAVITY_FLOOR) * RHO_WATER_4C
}

/// 유체 정보. 사용자 지정 밀도가 있으면 비중보다 우선한다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FluidDescriptor {
    /// 비중(ρ_fluid / ρ_water)
    pub specific_gravity: f64,
    /// 사용자 지정 밀도(kg/m³)
    pub density_override_kg_m3: Option<f64>,
}

impl Default for FluidDescriptor {
    fn default() -> Self {
        Self::from_specific_gravity(1.0)
    }
}

impl FluidDescriptor {
    pub fn from_specific_gravity(specific_gravity: f64) -> Self {
        Self {
            specific_gravity,
            density_override_kg_m3: None,
        }
    }

    /// 비중은 표시용으로 남겨 두고 밀도를 직접 지정한다.
    pub fn with_density_override(mut self, density_kg_m3: f64) -> Self {
        self.density_override_kg_m3 = Some(density_kg_m3);
        self
    }

    pub fn is_overridden(&self) -> bool {
        self.density_override_kg_m3.is_some()
    }

    /// 계산에 쓰일 밀도(kg/m³). 항상 양수이다.
    pub fn density_kg_m3(&self) -> f64 {
        match self.density_override_kg_m3 {
            Some(rho) => rho.max(DENSITY_FLOOR_KG_M3),
            None => density_from_sg(self.specific_gravity),
        }
    }
}
