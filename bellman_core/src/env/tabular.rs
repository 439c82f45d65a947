use tch::{Device, Kind, Tensor};
use crate::env::MdpEnvironment;
use crate::error::{BellmanError, SetupError, ShapeError, TensorError};

/// Default tolerance used when checking that transition rows sum to one.
pub const DISTRIBUTION_TOLERANCE: f64 = 1e-6;

/// Markov decision process stored as dense reward and transition tensors.
#[derive(Debug)]
pub struct TabularEnvironment{
    number_of_states: usize,
    number_of_actions: usize,
    rewards: Tensor,
    transitions: Tensor,
}

impl TabularEnvironment{

    /// Creates environment from reward tensor `[S, A]` and transition tensor `[S, A, S]`.
    /// Numbers of states and actions are read from reward tensor.
    pub fn new(rewards: Tensor, transitions: Tensor) -> Result<Self, BellmanError>{
        let reward_shape = rewards.size();
        if reward_shape.len() != 2{
            return Err(ShapeError::Rank {
                name: "rewards".into(),
                expected: 2,
                found: reward_shape.len(),
            }.into())
        }
        let env = Self{
            number_of_states: reward_shape[0] as usize,
            number_of_actions: reward_shape[1] as usize,
            rewards,
            transitions,
        };
        env.check_shapes()?;
        #[cfg(feature = "log_debug")]
        log::debug!("Created tabular environment with {} states and {} actions", env.number_of_states, env.number_of_actions);
        Ok(env)
    }

    /// Creates environment from nested vectors: `rewards[s][a]` and `transitions[s][a][s']`.
    /// Tensors are created with [`Kind::Double`] on [`Device::Cpu`].
    pub fn from_vecs(rewards: &[Vec<f64>], transitions: &[Vec<Vec<f64>>]) -> Result<Self, BellmanError>{
        let states = rewards.len();
        let actions = rewards.first().map(|row| row.len()).unwrap_or(0);
        if states == 0 || actions == 0{
            return Err(SetupError::EmptySpace {states, actions}.into())
        }
        if transitions.len() != states{
            return Err(ShapeError::LengthMismatch {
                left: states,
                right: transitions.len(),
                context: "Number of states in rewards and transitions".into(),
            }.into())
        }
        let mut reward_flat = Vec::with_capacity(states * actions);
        let mut transition_flat = Vec::with_capacity(states * actions * states);
        for (s, (reward_row, transition_rows)) in rewards.iter().zip(transitions.iter()).enumerate(){
            if reward_row.len() != actions {
                return Err(ShapeError::LengthMismatch {
                    left: actions,
                    right: reward_row.len(),
                    context: format!("Number of actions in rewards for state {s}"),
                }.into())
            }
            if transition_rows.len() != actions{
                return Err(ShapeError::LengthMismatch {
                    left: actions,
                    right: transition_rows.len(),
                    context: format!("Number of actions in transitions for state {s}"),
                }.into())
            }
            reward_flat.extend_from_slice(reward_row);
            for (a, row) in transition_rows.iter().enumerate(){
                if row.len() != states{
                    return Err(ShapeError::LengthMismatch {
                        left: states,
                        right: row.len(),
                        context: format!("Number of next states in transitions for state {s}, action {a}"),
                    }.into())
                }
                transition_flat.extend_from_slice(row);
            }
        }
        let (s, a) = (states as i64, actions as i64);
        let rewards_t = Tensor::from_slice(reward_flat.as_slice()).f_reshape([s, a])
            .map_err(|e| TensorError::from_tch_with_context(e, "Reshaping rewards".into()))?;
        let transitions_t = Tensor::from_slice(transition_flat.as_slice()).f_reshape([s, a, s])
            .map_err(|e| TensorError::from_tch_with_context(e, "Reshaping transitions".into()))?;
        Self::new(rewards_t, transitions_t)
    }

    /// Checks that every row `transitions[s, a, :]` is non-negative and sums to one within `tolerance`.
    pub fn validate_distributions(&self, tolerance: f64) -> Result<(), BellmanError>{
        let flat = self.transitions.f_to_kind(Kind::Double)
            .map(|t| t.to_device(Device::Cpu))
            .and_then(|t| t.f_flatten(0, -1))
            .map_err(|e| TensorError::from_tch_with_context(e, "Flattening transitions for validation".into()))?;
        let values = Vec::<f64>::try_from(&flat)
            .map_err(|e| TensorError::from_tch_with_context(e, "Reading transitions for validation".into()))?;
        for (index, row) in values.chunks(self.number_of_states).enumerate(){
            let (state, action) = (index / self.number_of_actions, index % self.number_of_actions);
            if let Some(p) = row.iter().find(|p| **p < 0.0 || p.is_nan()){
                return Err(SetupError::InvalidDistribution {
                    state, action,
                    reason: format!("probability {p} is not a non-negative number"),
                }.into())
            }
            let sum: f64 = row.iter().sum();
            if (sum - 1.0).abs() > tolerance{
                return Err(SetupError::InvalidDistribution {
                    state, action,
                    reason: format!("probabilities sum to {sum}"),
                }.into())
            }
        }
        Ok(())
    }

    /// Copies environment converting tensors to given kind and device.
    /// Kind must be floating point.
    pub fn to_kind_device(&self, kind: Kind, device: Device) -> Result<Self, BellmanError>{
        Self::new(
            self.rewards.f_to_kind(kind)?.to_device(device),
            self.transitions.f_to_kind(kind)?.to_device(device),
        )
    }

    pub fn kind(&self) -> Kind{
        self.rewards.kind()
    }

    pub fn device(&self) -> Device{
        self.rewards.device()
    }
}

impl MdpEnvironment for TabularEnvironment{
    fn number_of_states(&self) -> usize {
        self.number_of_states
    }

    fn number_of_actions(&self) -> usize {
        self.number_of_actions
    }

    fn rewards(&self) -> &Tensor {
        &self.rewards
    }

    fn transitions(&self) -> &Tensor {
        &self.transitions
    }
}
