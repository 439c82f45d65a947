use std::cell::Cell;
use tch::Tensor;
use bellman_core::env::{MdpEnvironment, TabularEnvironment, TabularEnvironmentBuilder};

/// Wraps environment and counts reads of reward and transition tensors.
pub struct CountingEnvironment<E: MdpEnvironment>{
    inner: E,
    reward_reads: Cell<usize>,
    transition_reads: Cell<usize>,
}

impl<E: MdpEnvironment> CountingEnvironment<E>{
    pub fn new(inner: E) -> Self{
        Self{inner, reward_reads: Cell::new(0), transition_reads: Cell::new(0)}
    }

    pub fn reward_reads(&self) -> usize{
        self.reward_reads.get()
    }

    pub fn transition_reads(&self) -> usize{
        self.transition_reads.get()
    }
}

impl<E: MdpEnvironment> MdpEnvironment for CountingEnvironment<E>{
    fn number_of_states(&self) -> usize {
        self.inner.number_of_states()
    }

    fn number_of_actions(&self) -> usize {
        self.inner.number_of_actions()
    }

    fn rewards(&self) -> &Tensor {
        self.reward_reads.set(self.reward_reads.get() + 1);
        self.inner.rewards()
    }

    fn transitions(&self) -> &Tensor {
        self.transition_reads.set(self.transition_reads.get() + 1);
        self.inner.transitions()
    }
}

/// Model exposing given tensors without any validation.
pub struct RawEnvironment{
    pub rewards: Tensor,
    pub transitions: Tensor,
}

impl MdpEnvironment for RawEnvironment{
    fn number_of_states(&self) -> usize {
        self.rewards.size()[0] as usize
    }

    fn number_of_actions(&self) -> usize {
        self.rewards.size()[1] as usize
    }

    fn rewards(&self) -> &Tensor {
        &self.rewards
    }

    fn transitions(&self) -> &Tensor {
        &self.transitions
    }
}

/// Deterministic ring of `n` states. Action `0` stays in place and pays nothing,
/// action `1` moves to the next state and pays `10`. Optimal policy is all ones with value `10 / (1 - gamma)`.
pub fn ring(n: usize) -> TabularEnvironment{
    let mut builder = TabularEnvironmentBuilder::new(n, 2);
    for s in 0..n{
        builder = builder
            .with_deterministic_transition(s, 0, s).unwrap()
            .with_deterministic_transition(s, 1, (s + 1) % n).unwrap()
            .with_reward(s, 1, 10.0).unwrap();
    }
    builder.build().unwrap()
}

pub fn zeros(n: usize) -> Tensor{
    Tensor::from_slice(&vec![0.0f64; n])
}

pub fn filled(n: usize, value: f64) -> Tensor{
    Tensor::from_slice(&vec![value; n])
}

pub fn actions(a: &[i64]) -> Tensor{
    Tensor::from_slice(a)
}

pub fn to_vec(t: &Tensor) -> Vec<f64>{
    Vec::<f64>::try_from(t).unwrap()
}

pub fn to_actions(t: &Tensor) -> Vec<i64>{
    Vec::<i64>::try_from(t).unwrap()
}

pub fn assert_close(found: &[f64], expected: &[f64], tolerance: f64){
    assert_eq!(found.len(), expected.len());
    for (i, (f, e)) in found.iter().zip(expected.iter()).enumerate(){
        assert!((f - e).abs() <= tolerance, "index {i}: found {f}, expected {e} (tolerance {tolerance})");
    }
}
