use getset::Getters;
use tch::{Kind, Tensor};
use bellman_core::error::TensorError;
use crate::config::Tolerance;

/// Action values for every state and action computed in one contraction:
/// `Q[s, a] = rewards[s, a] + gamma * sum_s' transitions[s, a, s'] * values[s']`.
///
/// Shapes: `rewards [S, A]`, `transitions [S, A, S]`, `values [S]`, output `[S, A]`.
pub fn bellman_q_values(rewards: &Tensor, transitions: &Tensor, values: &Tensor, gamma: f64) -> Result<Tensor, TensorError>{
    let expected_next = transitions.f_matmul(values)
        .map_err(|e| TensorError::from_tch_with_context(e, "Expected next state value (transitions x values)".into()))?;
    expected_next.f_mul_scalar(gamma)
        .and_then(|discounted| rewards.f_add(&discounted))
        .map_err(|e| TensorError::from_tch_with_context(e, "Adding rewards to discounted next state values".into()))
}

/// Maximum and maximising action along action dimension of `[S, A]` action values.
/// When several actions share maximum, index is chosen by the torch reduction.
pub fn greedy(q_values: &Tensor) -> Result<(Tensor, Tensor), TensorError>{
    q_values.f_max_dim(1, false)
        .map_err(|e| TensorError::from_tch_with_context(e, "Greedy selection over actions (max_dim)".into()))
}

/// Rewards collected when following `policy`: `rewards[s, policy[s]]`, shape `[S]`.
pub fn policy_rewards(rewards: &Tensor, policy: &Tensor) -> Result<Tensor, TensorError>{
    policy.f_unsqueeze(-1)
        .and_then(|index| rewards.f_gather(1, &index, false))
        .and_then(|r| r.f_squeeze_dim(-1))
        .map_err(|e| TensorError::from_tch_with_context(e, "Selecting rewards of policy actions".into()))
}

/// Transition matrix induced by `policy`: `transitions[s, policy[s], :]`, shape `[S, S]`.
pub fn policy_transitions(transitions: &Tensor, policy: &Tensor) -> Result<Tensor, TensorError>{
    let states = transitions.size().first().copied().unwrap_or(0);
    policy.f_view([states, 1, 1])
        .and_then(|index| index.f_expand([states, 1, states], false))
        .and_then(|index| transitions.f_gather(1, &index, false))
        .and_then(|t| t.f_squeeze_dim(1))
        .map_err(|e| TensorError::from_tch_with_context(e, "Selecting transition rows of policy actions".into()))
}

/// Markov reward process obtained by fixing actions with a deterministic policy.
#[derive(Debug, Getters)]
#[getset(get = "pub")]
pub struct PolicyModel{
    /// `[S]`
    rewards: Tensor,
    /// `[S, S]`
    transitions: Tensor,
}

impl PolicyModel{

    pub fn new(rewards: &Tensor, transitions: &Tensor, policy: &Tensor) -> Result<Self, TensorError>{
        Ok(Self{
            rewards: policy_rewards(rewards, policy)?,
            transitions: policy_transitions(transitions, policy)?,
        })
    }

    /// One synchronous evaluation sweep:
    /// `new[s] = rewards[s] + gamma * sum_s' transitions[s, s'] * values[s']`.
    /// Every state reads only `values`, result is a new tensor.
    pub fn sweep(&self, values: &Tensor, gamma: f64) -> Result<Tensor, TensorError>{
        self.transitions.f_matmul(values)
            .and_then(|next| next.f_mul_scalar(gamma))
            .and_then(|discounted| self.rewards.f_add(&discounted))
            .map_err(|e| TensorError::from_tch_with_context(e, "Policy evaluation sweep".into()))
    }
}

/// Single synchronous policy evaluation sweep, see [`PolicyModel::sweep`].
pub fn evaluation_sweep(rewards: &Tensor, transitions: &Tensor, policy: &Tensor, values: &Tensor, gamma: f64) -> Result<Tensor, TensorError>{
    PolicyModel::new(rewards, transitions, policy)?.sweep(values, gamma)
}

pub fn values_close(old: &Tensor, new: &Tensor, tolerance: Tolerance) -> Result<bool, TensorError>{
    old.f_allclose(new, tolerance.rtol(), tolerance.atol(), false)
        .map_err(|e| TensorError::from_tch_with_context(e, "Comparing value estimates (allclose)".into()))
}

pub fn policies_equal(old: &Tensor, new: &Tensor) -> Result<bool, TensorError>{
    let old = old.f_to_kind(Kind::Int64)?;
    let new = new.f_to_kind(Kind::Int64)?;
    old.f_equal(&new)
        .map_err(|e| TensorError::from_tch_with_context(e, "Comparing policies".into()))
}
