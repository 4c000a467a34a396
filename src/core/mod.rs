pub mod risk_reward;
pub mod sessions;
pub mod validator;
