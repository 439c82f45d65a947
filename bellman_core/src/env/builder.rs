use tch::{Device, Kind, Tensor};
use crate::env::{TabularEnvironment, DISTRIBUTION_TOLERANCE};
use crate::error::{BellmanError, SetupError, TensorError};

/// Incremental builder for [`TabularEnvironment`].
/// Rewards default to `0.0`, transition rows must be set for every `(state, action)` pair.
/// ```
/// use bellman_core::env::{MdpEnvironment, TabularEnvironmentBuilder};
/// let env = TabularEnvironmentBuilder::new(2, 1)
///     .with_reward(0, 0, 1.0).unwrap()
///     .with_deterministic_transition(0, 0, 1).unwrap()
///     .with_transition_row(1, 0, &[0.5, 0.5]).unwrap()
///     .build().unwrap();
/// assert_eq!(env.number_of_states(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct TabularEnvironmentBuilder{
    number_of_states: usize,
    number_of_actions: usize,
    rewards: Vec<f64>,
    transitions: Vec<f64>,
    kind: Kind,
    device: Device,
    validate: bool,
}

impl TabularEnvironmentBuilder{

    pub fn new(number_of_states: usize, number_of_actions: usize) -> Self{
        Self{
            number_of_states,
            number_of_actions,
            rewards: vec![0.0; number_of_states * number_of_actions],
            transitions: vec![0.0; number_of_states * number_of_actions * number_of_states],
            kind: Kind::Double,
            device: Device::Cpu,
            validate: true,
        }
    }

    fn check_index(what: &str, index: usize, limit: usize) -> Result<(), SetupError>{
        if index >= limit{
            return Err(SetupError::IndexOutOfRange {
                what: what.to_string(),
                index,
                limit,
            })
        }
        Ok(())
    }

    fn check_state_action(&self, state: usize, action: usize) -> Result<(), SetupError>{
        Self::check_index("state", state, self.number_of_states)?;
        Self::check_index("action", action, self.number_of_actions)
    }

    fn row_offset(&self, state: usize, action: usize) -> usize{
        (state * self.number_of_actions + action) * self.number_of_states
    }

    pub fn with_reward(mut self, state: usize, action: usize, reward: f64) -> Result<Self, BellmanError>{
        self.check_state_action(state, action)?;
        self.rewards[state * self.number_of_actions + action] = reward;
        Ok(self)
    }

    /// Sets the same reward for every action in state.
    pub fn with_state_reward(mut self, state: usize, reward: f64) -> Result<Self, BellmanError>{
        Self::check_index("state", state, self.number_of_states)?;
        let offset = state * self.number_of_actions;
        self.rewards[offset..offset + self.number_of_actions].fill(reward);
        Ok(self)
    }

    /// Adds `probability` to `P(next_state | state, action)`.
    pub fn with_transition(mut self, state: usize, action: usize, next_state: usize, probability: f64) -> Result<Self, BellmanError>{
        self.check_state_action(state, action)?;
        Self::check_index("next state", next_state, self.number_of_states)?;
        let offset = self.row_offset(state, action);
        self.transitions[offset + next_state] += probability;
        Ok(self)
    }

    /// Replaces whole distribution `P(. | state, action)`.
    pub fn with_transition_row(mut self, state: usize, action: usize, row: &[f64]) -> Result<Self, BellmanError>{
        self.check_state_action(state, action)?;
        if row.len() != self.number_of_states{
            return Err(crate::error::ShapeError::LengthMismatch {
                left: self.number_of_states,
                right: row.len(),
                context: format!("Transition row for state {state}, action {action}"),
            }.into())
        }
        let offset = self.row_offset(state, action);
        self.transitions[offset..offset + self.number_of_states].copy_from_slice(row);
        Ok(self)
    }

    pub fn with_deterministic_transition(self, state: usize, action: usize, next_state: usize) -> Result<Self, BellmanError>{
        let mut row = vec![0.0; self.number_of_states];
        Self::check_index("next state", next_state, self.number_of_states)?;
        row[next_state] = 1.0;
        self.with_transition_row(state, action, &row)
    }

    pub fn with_kind(mut self, kind: Kind) -> Self{
        self.kind = kind;
        self
    }

    pub fn with_device(mut self, device: Device) -> Self{
        self.device = device;
        self
    }

    /// Switches checking that transition rows are probability distributions on [`build`](Self::build).
    pub fn with_validation(mut self, validate: bool) -> Self{
        self.validate = validate;
        self
    }

    pub fn build(self) -> Result<TabularEnvironment, BellmanError>{
        if self.number_of_states == 0 || self.number_of_actions == 0{
            return Err(SetupError::EmptySpace {
                states: self.number_of_states,
                actions: self.number_of_actions
            }.into())
        }
        for (index, row) in self.transitions.chunks(self.number_of_states).enumerate(){
            if row.iter().all(|p| *p == 0.0){
                return Err(SetupError::MissingTransition {
                    state: index / self.number_of_actions,
                    action: index % self.number_of_actions,
                }.into())
            }
        }
        let (s, a) = (self.number_of_states as i64, self.number_of_actions as i64);
        let rewards = Tensor::from_slice(self.rewards.as_slice()).f_reshape([s, a])
            .and_then(|t| t.f_to_kind(self.kind))
            .map_err(|e| TensorError::from_tch_with_context(e, "Building reward tensor".into()))?
            .to_device(self.device);
        let transitions = Tensor::from_slice(self.transitions.as_slice()).f_reshape([s, a, s])
            .and_then(|t| t.f_to_kind(self.kind))
            .map_err(|e| TensorError::from_tch_with_context(e, "Building transition tensor".into()))?
            .to_device(self.device);
        let env = TabularEnvironment::new(rewards, transitions)?;
        if self.validate{
            env.validate_distributions(DISTRIBUTION_TOLERANCE)?;
        }
        Ok(env)
    }
}

#[cfg(test)]
mod tests{
    use tch::Kind;
    use crate::env::{MdpEnvironment, TabularEnvironmentBuilder};
    use crate::error::{BellmanError, SetupError};

    #[test]
    fn builder_places_values(){
        let env = TabularEnvironmentBuilder::new(3, 2)
            .with_reward(2, 1, 4.5).unwrap()
            .with_state_reward(0, -1.0).unwrap()
            .with_deterministic_transition(0, 0, 0).unwrap()
            .with_deterministic_transition(0, 1, 1).unwrap()
            .with_deterministic_transition(1, 0, 0).unwrap()
            .with_transition(1, 1, 2, 0.25).unwrap()
            .with_transition(1, 1, 1, 0.75).unwrap()
            .with_transition_row(2, 0, &[0.2, 0.3, 0.5]).unwrap()
            .with_deterministic_transition(2, 1, 2).unwrap()
            .build().unwrap();

        assert_eq!(env.rewards().double_value(&[2, 1]), 4.5);
        assert_eq!(env.rewards().double_value(&[0, 0]), -1.0);
        assert_eq!(env.rewards().double_value(&[0, 1]), -1.0);
        assert_eq!(env.rewards().double_value(&[1, 0]), 0.0);
        assert_eq!(env.transitions().double_value(&[1, 1, 2]), 0.25);
        assert_eq!(env.transitions().double_value(&[2, 0, 2]), 0.5);
        assert_eq!(env.transitions().double_value(&[0, 1, 1]), 1.0);
    }

    #[test]
    fn missing_row_is_reported(){
        let result = TabularEnvironmentBuilder::new(2, 1)
            .with_deterministic_transition(0, 0, 1).unwrap()
            .build();
        assert!(matches!(result, Err(BellmanError::Setup {source: SetupError::MissingTransition {state: 1, action: 0}})));
    }

    #[test]
    fn out_of_range_index_is_reported(){
        let result = TabularEnvironmentBuilder::new(2, 2)
            .with_reward(0, 2, 1.0);
        assert!(matches!(result, Err(BellmanError::Setup {source: SetupError::IndexOutOfRange {index: 2, limit: 2, ..}})));
    }

    #[test]
    fn validation_can_be_disabled(){
        let builder = TabularEnvironmentBuilder::new(2, 1)
            .with_transition_row(0, 0, &[0.5, 0.2]).unwrap()
            .with_transition_row(1, 0, &[0.0, 1.0]).unwrap();
        assert!(builder.clone().build().is_err());
        assert!(builder.with_validation(false).build().is_ok());
    }

    #[test]
    fn kind_is_applied(){
        let env = TabularEnvironmentBuilder::new(1, 1)
            .with_deterministic_transition(0, 0, 0).unwrap()
            .with_kind(Kind::Float)
            .build().unwrap();
        assert_eq!(env.rewards().kind(), Kind::Float);
        assert_eq!(env.transitions().kind(), Kind::Float);
    }
}
