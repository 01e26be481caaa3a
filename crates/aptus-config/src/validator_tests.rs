    use super::*;
    use crate::schema::AptusConfig;

    fn valid_config() -> Config {
        Config {
            aptus: AptusConfig {
                base_url: "https://aptus.example.com/AptusPortal".to_string(),
                username: "admin".to_string(),
                password: "secret".to_string(),
                min_customer_id: 0,
                max_customer_id: 600,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_valid_config() {
        let result = ConfigValidator::validate(&valid_config()).unwrap();
        assert!(result.is_valid());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_validate_default_config_is_invalid() {
        let result = ConfigValidator::validate(&Config::default()).unwrap();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.path == "aptus.base_url"));
        assert!(result.errors.iter().any(|e| e.path == "aptus.username"));
        assert!(result.errors.iter().any(|e| e.path == "aptus.password"));
    }

    #[test]
    fn test_validate_invalid_base_url() {
        let mut config = valid_config();
        config.aptus.base_url = "aptus.example.com".to_string();

        let result = ConfigValidator::validate(&config).unwrap();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.path == "aptus.base_url"));
    }

    #[test]
    fn test_validate_http_base_url() {
        let mut config = valid_config();
        config.aptus.base_url = "http://localhost:8000/AptusPortal".to_string();

        let result = ConfigValidator::validate(&config).unwrap();
        assert!(result.is_valid());
    }

    #[test]
    fn test_validate_empty_range() {
        let mut config = valid_config();
        config.aptus.min_customer_id = 100;
        config.aptus.max_customer_id = 100;

        let result = ConfigValidator::validate(&config).unwrap();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.path == "aptus.max_customer_id"));
    }

    #[test]
    fn test_validate_inverted_range() {
        let mut config = valid_config();
        config.aptus.min_customer_id = 500;
        config.aptus.max_customer_id = 10;

        let result = ConfigValidator::validate(&config).unwrap();
        assert!(!result.is_valid());
    }

    #[test]
    fn test_validate_large_range_warning() {
        let mut config = valid_config();
        config.aptus.max_customer_id = 50_000;

        let result = ConfigValidator::validate(&config).unwrap();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.path == "aptus.max_customer_id"));
    }

    #[test]
    fn test_validate_zero_implicit_wait() {
        let mut config = valid_config();
        config.browser.implicit_wait_ms = 0;

        let result = ConfigValidator::validate(&config).unwrap();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.path == "browser.implicit_wait_ms"));
    }

    #[test]
    fn test_validate_zero_port() {
        let mut config = valid_config();
        config.browser.debug_port = 0;

        let result = ConfigValidator::validate(&config).unwrap();
        assert!(result.errors.iter().any(|e| e.path == "browser.debug_port"));
    }

    #[test]
    fn test_validation_result_add_warning() {
        let mut result = ValidationResult::default();
        result.add_warning(ValidationWarning::new("test", "warning"));
        assert!(result.is_valid()); // Warnings don't make it invalid
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_into_result_joins_errors() {
        let result = ConfigValidator::validate(&Config::default()).unwrap();
        let err = result.into_result().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("aptus.base_url"));
        assert!(message.contains("aptus.username"));
    }

    #[test]
    fn test_into_result_returns_warnings() {
        let mut config = valid_config();
        config.aptus.max_customer_id = 50_000;

        let warnings = ConfigValidator::validate(&config)
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(warnings.len(), 1);
    }
