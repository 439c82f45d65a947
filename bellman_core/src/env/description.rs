use serde::{Deserialize, Serialize};
use tch::{Device, Kind};
use crate::env::{MdpEnvironment, TabularEnvironment, DISTRIBUTION_TOLERANCE};
use crate::error::{BellmanError, TensorError};

/// Plain data form of [`TabularEnvironment`], suitable for configuration files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabularDescription{
    /// `rewards[s][a]`
    pub rewards: Vec<Vec<f64>>,
    /// `transitions[s][a][s']`
    pub transitions: Vec<Vec<Vec<f64>>>,
    /// Check that transition rows are probability distributions when converting.
    #[serde(default)]
    pub validate: bool,
}

impl TryFrom<&TabularDescription> for TabularEnvironment{
    type Error = BellmanError;

    fn try_from(value: &TabularDescription) -> Result<Self, Self::Error> {
        let env = TabularEnvironment::from_vecs(&value.rewards, &value.transitions)?;
        if value.validate{
            env.validate_distributions(DISTRIBUTION_TOLERANCE)?;
        }
        Ok(env)
    }
}

impl TabularEnvironment{

    /// Copies tensors back into nested vectors.
    pub fn describe(&self) -> Result<TabularDescription, BellmanError>{
        let states = self.number_of_states();
        let actions = self.number_of_actions();
        let rewards = Vec::<f64>::try_from(
            &self.rewards().f_to_kind(Kind::Double)?.to_device(Device::Cpu).f_flatten(0, -1)?
        ).map_err(|e| TensorError::from_tch_with_context(e, "Reading rewards".into()))?;
        let transitions = Vec::<f64>::try_from(
            &self.transitions().f_to_kind(Kind::Double)?.to_device(Device::Cpu).f_flatten(0, -1)?
        ).map_err(|e| TensorError::from_tch_with_context(e, "Reading transitions".into()))?;

        Ok(TabularDescription{
            rewards: rewards.chunks(actions).map(|row| row.to_vec()).collect(),
            transitions: transitions.chunks(actions * states)
                .map(|state_block| state_block.chunks(states).map(|row| row.to_vec()).collect())
                .collect(),
            validate: false,
        })
    }
}
