use crate::fd_gan::{FdGanError, GanMode, TrainerConfig};

#[test]
fn test_default_hyper_parameters() {
    let config = TrainerConfig::default();
    assert_eq!(config.device, "cuda");
    assert_eq!(config.learning_rate, 0.0002);
    assert_eq!((config.beta1, config.beta2), (0.5, 0.999));
    assert_eq!(config.gan_mode, GanMode::Vanilla);
    assert_eq!(config.log_every, 10);
    config.validate().unwrap();
}

#[test]
fn test_partial_json_uses_defaults() {
    let config = TrainerConfig::from_json(r#"{"seed": 3, "gan_mode": "least_squares"}"#).unwrap();
    assert_eq!(config.seed, 3);
    assert_eq!(config.gan_mode, GanMode::LeastSquares);
    assert_eq!(config.channels, 3);
}

#[test]
fn test_json_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trainer.json");
    let config = TrainerConfig {
        seed: 11,
        generator_width: 8,
        ..TrainerConfig::default()
    };
    std::fs::write(&path, config.to_json().unwrap()).unwrap();
    assert_eq!(TrainerConfig::from_json_file(&path).unwrap(), config);
}

#[test]
fn test_invalid_configs_are_rejected() {
    assert!(matches!(
        TrainerConfig::from_json(r#"{"learning_rate": 0.0}"#),
        Err(FdGanError::InvalidConfig(_))
    ));
    assert!(matches!(
        TrainerConfig::from_json(r#"{"beta1": 1.0}"#),
        Err(FdGanError::InvalidConfig(_))
    ));
    assert!(matches!(
        TrainerConfig::from_json(r#"{"log_every": 0}"#),
        Err(FdGanError::InvalidConfig(_))
    ));
    assert!(matches!(
        TrainerConfig::from_json(r#"{"unknown_field": 1}"#),
        Err(FdGanError::Config(_))
    ));
    assert!(matches!(
        TrainerConfig::from_json_file("/nonexistent/trainer.json"),
        Err(FdGanError::Io(_))
    ));
}
