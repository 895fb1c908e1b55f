mod chain_cost;
mod combo_reward;

pub use chain_cost::ChainCostCalculator;
pub use combo_reward::ComboRewardCalculator;
