// crates/ef_physics/src/initial.rs

//! 初始条件
//!
//! 先用均匀状态填满全场，再按顺序应用初始化块：
//! 形心落在块区域内的单元取该块状态，后出现的块覆盖先出现的块。

use glam::DVec3;

use ef_config::{InitialConfig, PrimitiveState};

use crate::fluid::Fluid;
use crate::mesh::Mesh;
use crate::state::ConservedState;

/// 原始变量状态转守恒状态
pub fn conserved_from_primitive(config: &InitialConfig, state: &PrimitiveState, fluid: &Fluid) -> ConservedState {
    let rho = state.density_with(config.variables, fluid.gas_constant);
    fluid.conserved(rho, DVec3::from_array(state.velocity), state.pressure)
}

/// 按配置生成全部单元的初始守恒状态
pub fn initial_state(mesh: &Mesh, config: &InitialConfig, fluid: &Fluid) -> Vec<ConservedState> {
    let base = conserved_from_primitive(config, &config.state, fluid);
    let mut state = vec![base; mesh.n_cells()];

    for (b, block) in config.blocks.iter().enumerate() {
        let w = conserved_from_primitive(config, &block.resolve(&config.state), fluid);
        let mut count = 0usize;
        for (cell, slot) in mesh.cells.iter().zip(state.iter_mut()) {
            if block.region.contains(cell.centroid.to_array()) {
                *slot = w;
                count += 1;
            }
        }
        log::debug!("初始化块 {b} 覆盖 {count} 个单元");
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ef_config::{Dimension, InitialBlock, InitialVariables, Region};

    use crate::mesh::CartesianMeshBuilder;

    fn line(n: usize) -> Mesh {
        CartesianMeshBuilder::new(Dimension::OneD, [n, 1, 1], [1.0, 1.0, 1.0])
            .build()
            .unwrap()
    }

    #[test]
    fn test_temperature_based_density() {
        let mesh = line(2);
        let config = InitialConfig::default();
        let fluid = Fluid::default();
        let state = initial_state(&mesh, &config, &fluid);
        assert_relative_eq!(state[0].density(), 101325.0 / 300.0 / 287.0, max_relative = 1e-14);
        assert_relative_eq!(state[1].energy(), 101325.0 / 0.4, max_relative = 1e-14);
    }

    #[test]
    fn test_later_blocks_win() {
        let mesh = line(4);
        let base = PrimitiveState {
            density: 0.125,
            pressure: 0.1,
            ..PrimitiveState::default()
        };
        let left = PrimitiveState {
            density: 1.0,
            pressure: 1.0,
            ..PrimitiveState::default()
        };
        let config = InitialConfig::uniform(InitialVariables::DensityBased, base)
            .with_block(InitialBlock::new(Region::boxed([-1.0; 3], [0.5, 1.0, 1.0]), left))
            .with_block(InitialBlock {
                region: Region::boxed([-1.0; 3], [0.25, 1.0, 1.0]),
                density: Some(2.0),
                pressure: None,
                temperature: None,
                velocity: None,
            });
        let state = initial_state(&mesh, &config, &Fluid::default());
        let rho: Vec<f64> = state.iter().map(|w| w.density()).collect();
        assert_eq!(rho, vec![2.0, 1.0, 0.125, 0.125]);
        // 第二个块未给压力，继承均匀状态 p = 0.1
        assert_relative_eq!(state[0].energy(), 0.1 / 0.4, max_relative = 1e-14);
    }
}
