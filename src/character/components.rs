use bevy::prelude::*;

/// 玩家标记组件
#[derive(Component)]
pub struct Player;

/// 充能条（大招能量）。宿主会在切换快捷栏槽位时把它清零，
/// preserve 模块负责把清掉的值找回来
#[derive(Component, Debug, Clone)]
pub struct SignatureEnergy {
    pub value: f32,
    pub max: f32,
}

impl Default for SignatureEnergy {
    fn default() -> Self {
        Self {
            value: 0.0,
            max: 100.0,
        }
    }
}

impl SignatureEnergy {
    /// 写入并夹到 [0, max]
    pub fn set(&mut self, value: f32) {
        self.value = value.clamp(0.0, self.max);
    }

    /// 累加充能
    pub fn gain(&mut self, amount: f32) {
        self.set(self.value + amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_clamps_to_range() {
        let mut energy = SignatureEnergy::default();
        energy.set(120.0);
        assert_eq!(energy.value, 100.0);
        energy.set(-5.0);
        assert_eq!(energy.value, 0.0);
    }

    #[test]
    fn gain_accumulates() {
        let mut energy = SignatureEnergy::default();
        energy.gain(30.0);
        energy.gain(30.0);
        assert_eq!(energy.value, 60.0);
        energy.gain(70.0);
        assert_eq!(energy.value, 100.0);
    }
}
