use std::fs;
use std::path::Path;
use bellman_core::env::{TabularDescription, TabularEnvironment};
use crate::error::ExampleError;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DescriptionFormat{
    Json,
    Yaml,
}

impl DescriptionFormat{
    pub fn from_path(path: &Path) -> Result<Self, ExampleError>{
        match path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase()).as_deref(){
            Some("json") => Ok(Self::Json),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            _ => Err(ExampleError::UnknownFormat(path.to_path_buf()))
        }
    }
}

pub fn parse_description(content: &str, format: DescriptionFormat) -> Result<TabularDescription, ExampleError>{
    Ok(match format{
        DescriptionFormat::Json => serde_json::from_str(content)?,
        DescriptionFormat::Yaml => serde_yaml::from_str(content)?,
    })
}

pub fn load_description(path: &Path) -> Result<TabularDescription, ExampleError>{
    let format = DescriptionFormat::from_path(path)?;
    let content = fs::read_to_string(path)
        .map_err(|source| ExampleError::Io {path: path.to_path_buf(), source})?;
    parse_description(&content, format)
}

pub fn load_environment(path: &Path) -> Result<TabularEnvironment, ExampleError>{
    let description = load_description(path)?;
    log::debug!("Loaded environment with {} states from {:?}", description.rewards.len(), path);
    Ok(TabularEnvironment::try_from(&description)?)
}

pub fn save_description(path: &Path, description: &TabularDescription) -> Result<(), ExampleError>{
    let content = match DescriptionFormat::from_path(path)?{
        DescriptionFormat::Json => serde_json::to_string_pretty(description)?,
        DescriptionFormat::Yaml => serde_yaml::to_string(description)?,
    };
    fs::write(path, content)
        .map_err(|source| ExampleError::Io {path: path.to_path_buf(), source})
}

#[cfg(test)]
mod tests{
    use std::path::Path;
    use bellman_core::env::{MdpEnvironment, TabularEnvironment};
    use bellman_core::error::{BellmanError, ShapeError};
    use crate::error::ExampleError;
    use crate::loading::{parse_description, DescriptionFormat};

    #[test]
    fn format_by_extension(){
        assert_eq!(DescriptionFormat::from_path(Path::new("env.json")).unwrap(), DescriptionFormat::Json);
        assert_eq!(DescriptionFormat::from_path(Path::new("env.YML")).unwrap(), DescriptionFormat::Yaml);
        assert!(matches!(DescriptionFormat::from_path(Path::new("env.ron")), Err(ExampleError::UnknownFormat(_))));
        assert!(DescriptionFormat::from_path(Path::new("env")).is_err());
    }

    #[test]
    fn json_description(){
        let content = r#"{
            "rewards": [[5.0, 10.0], [-1.0, 2.0]],
            "transitions": [[[0.5, 0.5], [0.5, 0.5]], [[0.5, 0.5], [0.5, 0.5]]]
        }"#;
        let description = parse_description(content, DescriptionFormat::Json).unwrap();
        assert!(!description.validate);
        let env = TabularEnvironment::try_from(&description).unwrap();
        assert_eq!(env.number_of_states(), 2);
        assert_eq!(env.rewards().double_value(&[0, 1]), 10.0);
    }

    #[test]
    fn yaml_description(){
        let content = "
rewards:
  - [1.0]
  - [0.0]
transitions:
  - [[0.0, 1.0]]
  - [[1.0, 0.0]]
validate: true
";
        let description = parse_description(content, DescriptionFormat::Yaml).unwrap();
        assert!(description.validate);
        let env = TabularEnvironment::try_from(&description).unwrap();
        assert_eq!(env.number_of_actions(), 1);
        assert_eq!(env.transitions().double_value(&[1, 0, 0]), 1.0);
    }

    #[test]
    fn malformed_input(){
        assert!(matches!(parse_description("{", DescriptionFormat::Json), Err(ExampleError::Json(_))));
        let ragged = r#"{"rewards": [[1.0, 2.0], [1.0]], "transitions": [[[1.0], [1.0]], [[1.0]]]}"#;
        let description = parse_description(ragged, DescriptionFormat::Json).unwrap();
        assert!(matches!(
            TabularEnvironment::try_from(&description),
            Err(BellmanError::Shape {source: ShapeError::LengthMismatch {left: 2, right: 1, ..}})
        ));
    }
}
