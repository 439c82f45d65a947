//! Small environments used in examples, tests and benchmarks.
use crate::env::{TabularEnvironment, TabularEnvironmentBuilder};
use crate::error::{BellmanError, SetupError};

/// Two states, two actions, every transition uniform over both states.
/// Rewards are `[[5, 10], [-1, 2]]`, so action `1` is better in both states.
pub fn two_state_uniform() -> Result<TabularEnvironment, BellmanError>{
    TabularEnvironment::from_vecs(
        &[vec![5.0, 10.0], vec![-1.0, 2.0]],
        &[
            vec![vec![0.5, 0.5], vec![0.5, 0.5]],
            vec![vec![0.5, 0.5], vec![0.5, 0.5]],
        ]
    )
}

/// One state with one action looping to itself with given reward.
/// Optimal value is `reward / (1 - gamma)`.
pub fn single_state(reward: f64) -> Result<TabularEnvironment, BellmanError>{
    TabularEnvironment::from_vecs(&[vec![reward]], &[vec![vec![1.0]]])
}

pub const CORRIDOR_LEFT: usize = 0;
pub const CORRIDOR_RIGHT: usize = 1;

/// Deterministic corridor of `length` cells. Action [`CORRIDOR_LEFT`] moves left (bouncing off the wall
/// in cell `0`), [`CORRIDOR_RIGHT`] moves right. Every move costs `step_cost`, except entering the
/// last cell which pays `goal_reward`. Last cell is absorbing: staying with [`CORRIDOR_RIGHT`] is free,
/// [`CORRIDOR_LEFT`] still costs `step_cost`, so the unique optimal policy is to go right everywhere.
pub fn corridor(length: usize, goal_reward: f64, step_cost: f64) -> Result<TabularEnvironment, BellmanError>{
    if length < 2{
        return Err(SetupError::InvalidParameter {
            name: "length".into(),
            value: format!("{length}"),
        }.into())
    }
    let goal = length - 1;
    let mut builder = TabularEnvironmentBuilder::new(length, 2);
    for s in 0..goal{
        let right_reward = if s + 1 == goal { goal_reward } else { -step_cost };
        builder = builder
            .with_deterministic_transition(s, CORRIDOR_LEFT, s.saturating_sub(1))?
            .with_reward(s, CORRIDOR_LEFT, -step_cost)?
            .with_deterministic_transition(s, CORRIDOR_RIGHT, s + 1)?
            .with_reward(s, CORRIDOR_RIGHT, right_reward)?;
    }
    builder
        .with_deterministic_transition(goal, CORRIDOR_LEFT, goal)?
        .with_reward(goal, CORRIDOR_LEFT, -step_cost)?
        .with_deterministic_transition(goal, CORRIDOR_RIGHT, goal)?
        .build()
}

/// Parameters of [`grid_world`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridWorldConfig{
    pub width: usize,
    pub height: usize,
    /// Probability of slipping to one of two directions perpendicular to the chosen one
    /// (split evenly).
    pub slip: f64,
    pub goal: (usize, usize),
    pub pit: Option<(usize, usize)>,
    pub goal_reward: f64,
    pub pit_reward: f64,
    pub step_reward: f64,
}

impl Default for GridWorldConfig{
    fn default() -> Self {
        Self{
            width: 4,
            height: 4,
            slip: 0.2,
            goal: (3, 3),
            pit: Some((1, 2)),
            goal_reward: 1.0,
            pit_reward: -1.0,
            step_reward: -0.04,
        }
    }
}

pub const GRID_UP: usize = 0;
pub const GRID_RIGHT: usize = 1;
pub const GRID_DOWN: usize = 2;
pub const GRID_LEFT: usize = 3;

impl GridWorldConfig{

    pub fn number_of_states(&self) -> usize{
        self.width * self.height
    }

    /// Index of cell `(x, y)`.
    pub fn state(&self, x: usize, y: usize) -> usize{
        y * self.width + x
    }

    fn shift(&self, state: usize, direction: usize) -> usize{
        let (x, y) = (state % self.width, state / self.width);
        let (nx, ny) = match direction{
            GRID_UP => (x, y.saturating_sub(1)),
            GRID_RIGHT => ((x + 1).min(self.width - 1), y),
            GRID_DOWN => (x, (y + 1).min(self.height - 1)),
            _ => (x.saturating_sub(1), y),
        };
        self.state(nx, ny)
    }

    fn check(&self) -> Result<(), SetupError>{
        if self.width == 0 || self.height == 0{
            return Err(SetupError::EmptySpace {states: self.number_of_states(), actions: 4})
        }
        if !(0.0..=1.0).contains(&self.slip){
            return Err(SetupError::InvalidParameter {name: "slip".into(), value: format!("{}", self.slip)})
        }
        for (name, cell) in [("goal", Some(self.goal)), ("pit", self.pit)]{
            if let Some((x, y)) = cell{
                if x >= self.width || y >= self.height{
                    return Err(SetupError::InvalidParameter {name: name.into(), value: format!("({x}, {y})")})
                }
            }
        }
        Ok(())
    }
}

/// Rectangular grid with four moves ([`GRID_UP`], [`GRID_RIGHT`], [`GRID_DOWN`], [`GRID_LEFT`]).
/// Walking into a wall leaves agent in place. Goal and pit cells are absorbing and pay nothing
/// once entered; entering them pays `goal_reward` / `pit_reward`, every other step pays `step_reward`.
/// Rewards in the tensor are expectations over slipping.
pub fn grid_world(config: &GridWorldConfig) -> Result<TabularEnvironment, BellmanError>{
    config.check()?;
    let states = config.number_of_states();
    let goal = config.state(config.goal.0, config.goal.1);
    let pit = config.pit.map(|(x, y)| config.state(x, y));
    let is_terminal = |s: usize| s == goal || Some(s) == pit;
    let entry_reward = |s: usize| {
        if s == goal { config.goal_reward }
        else if Some(s) == pit { config.pit_reward }
        else { config.step_reward }
    };

    let mut builder = TabularEnvironmentBuilder::new(states, 4);
    for s in 0..states{
        for a in [GRID_UP, GRID_RIGHT, GRID_DOWN, GRID_LEFT]{
            if is_terminal(s){
                builder = builder.with_deterministic_transition(s, a, s)?;
                continue;
            }
            let outcomes = [
                (a, 1.0 - config.slip),
                ((a + 1) % 4, config.slip / 2.0),
                ((a + 3) % 4, config.slip / 2.0),
            ];
            let mut expected_reward = 0.0;
            for (direction, p) in outcomes{
                if p == 0.0{
                    continue;
                }
                let next = config.shift(s, direction);
                expected_reward += p * entry_reward(next);
                builder = builder.with_transition(s, a, next, p)?;
            }
            builder = builder.with_reward(s, a, expected_reward)?;
        }
    }
    builder.build()
}

#[cfg(test)]
mod tests{
    use crate::demo::{corridor, grid_world, single_state, two_state_uniform, GridWorldConfig, CORRIDOR_LEFT, CORRIDOR_RIGHT, GRID_RIGHT, GRID_UP};
    use crate::env::{MdpEnvironment, DISTRIBUTION_TOLERANCE};

    #[test]
    fn demo_shapes(){
        let env = two_state_uniform().unwrap();
        assert_eq!(env.rewards().size(), vec![2, 2]);
        let env = single_state(3.0).unwrap();
        assert_eq!(env.transitions().size(), vec![1, 1, 1]);
        let env = corridor(5, 10.0, 1.0).unwrap();
        assert_eq!(env.transitions().size(), vec![5, 2, 5]);
    }

    #[test]
    fn corridor_moves(){
        let env = corridor(4, 10.0, 1.0).unwrap();
        assert_eq!(env.transitions().double_value(&[0, CORRIDOR_LEFT as i64, 0]), 1.0);
        assert_eq!(env.transitions().double_value(&[1, CORRIDOR_RIGHT as i64, 2]), 1.0);
        assert_eq!(env.rewards().double_value(&[2, CORRIDOR_RIGHT as i64]), 10.0);
        assert_eq!(env.rewards().double_value(&[1, CORRIDOR_RIGHT as i64]), -1.0);
        assert_eq!(env.rewards().double_value(&[3, CORRIDOR_RIGHT as i64]), 0.0);
        assert_eq!(env.transitions().double_value(&[3, CORRIDOR_LEFT as i64, 3]), 1.0);
        assert!(corridor(1, 1.0, 1.0).is_err());
    }

    #[test]
    fn grid_world_rows_are_distributions(){
        let config = GridWorldConfig::default();
        let env = grid_world(&config).unwrap();
        assert_eq!(env.number_of_states(), 16);
        assert_eq!(env.number_of_actions(), 4);
        env.validate_distributions(DISTRIBUTION_TOLERANCE).unwrap();

        // from (0,0) going up: 0.8 bump into wall, 0.1 slip right, 0.1 slip left into wall
        let s = config.state(0, 0) as i64;
        assert!((env.transitions().double_value(&[s, GRID_UP as i64, s]) - 0.9).abs() < 1e-12);
        assert!((env.transitions().double_value(&[s, GRID_UP as i64, 1]) - 0.1).abs() < 1e-12);
        assert!((env.rewards().double_value(&[s, GRID_RIGHT as i64]) + 0.04).abs() < 1e-12);
    }

    #[test]
    fn grid_world_rejects_bad_config(){
        let config = GridWorldConfig{slip: 1.5, ..Default::default()};
        assert!(grid_world(&config).is_err());
        let config = GridWorldConfig{goal: (4, 0), ..Default::default()};
        assert!(grid_world(&config).is_err());
    }
}
