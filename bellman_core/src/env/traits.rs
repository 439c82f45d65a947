use tch::{Kind, Tensor};
use crate::error::{BellmanError, SetupError, ShapeError};

/// Source of a finite Markov decision process model.
///
/// Implementor exposes number of states `S`, number of actions `A` and two dense tensors:
/// + rewards of shape `[S, A]`, where `rewards[s, a]` is expected immediate reward for taking `a` in `s`;
/// + transitions of shape `[S, A, S]`, where `transitions[s, a, s']` is `P(s' | s, a)`.
///
/// Solvers only borrow the model and never modify it. Rows `transitions[s, a, :]` are expected
/// to be probability distributions, this is not checked by solvers.
pub trait MdpEnvironment{

    fn number_of_states(&self) -> usize;

    fn number_of_actions(&self) -> usize;

    /// Reward tensor of shape `[S, A]`.
    fn rewards(&self) -> &Tensor;

    /// Transition tensor of shape `[S, A, S]`.
    fn transitions(&self) -> &Tensor;

    /// Checks if reward and transition tensors agree with declared numbers of states and actions,
    /// have the same floating point kind and live on the same device.
    fn check_shapes(&self) -> Result<(), BellmanError>{
        let states = self.number_of_states();
        let actions = self.number_of_actions();
        if states == 0 || actions == 0{
            return Err(SetupError::EmptySpace {states, actions}.into())
        }
        let (s, a) = (states as i64, actions as i64);
        ShapeError::check("rewards", self.rewards(), &[s, a])?;
        ShapeError::check("transitions", self.transitions(), &[s, a, s])?;

        let (rewards, transitions) = (self.rewards(), self.transitions());
        for (name, tensor) in [("rewards", rewards), ("transitions", transitions)]{
            if !is_floating(tensor.kind()){
                return Err(SetupError::NonFloatingKind {
                    name: name.into(),
                    kind: format!("{:?}", tensor.kind()),
                }.into())
            }
        }
        if rewards.kind() != transitions.kind(){
            return Err(SetupError::KindMismatch {
                rewards: format!("{:?}", rewards.kind()),
                transitions: format!("{:?}", transitions.kind()),
            }.into())
        }
        if rewards.device() != transitions.device(){
            return Err(SetupError::DeviceMismatch {
                rewards: format!("{:?}", rewards.device()),
                transitions: format!("{:?}", transitions.device()),
            }.into())
        }
        Ok(())
    }
}

pub(crate) fn is_floating(kind: Kind) -> bool{
    matches!(kind, Kind::Half | Kind::BFloat16 | Kind::Float | Kind::Double)
}
