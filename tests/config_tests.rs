use clinic_portal::config::{AppConfig, Env};
use serial_test::serial;

// Environment variables are process-global, so every test that touches them
// runs serialized.

fn clear_env() {
    unsafe {
        std::env::remove_var("APP_ENV");
        std::env::remove_var("SUPABASE_URL");
        std::env::remove_var("SUPABASE_ANON_KEY");
    }
}

#[test]
fn test_default_config_is_local() {
    let config = AppConfig::default();
    assert_eq!(config.env, Env::Local);
    assert!(!config.supabase_url.is_empty());
    assert!(!config.supabase_anon_key.is_empty());
}

#[test]
#[serial]
fn test_load_without_env_falls_back_to_local() {
    clear_env();

    let config = AppConfig::load();
    assert_eq!(config.env, Env::Local);
    assert_eq!(config.supabase_url, "http://localhost:54321");
}

#[test]
#[serial]
fn test_load_local_honors_explicit_values() {
    clear_env();
    unsafe {
        std::env::set_var("SUPABASE_URL", "http://127.0.0.1:8000");
        std::env::set_var("SUPABASE_ANON_KEY", "local-anon");
    }

    let config = AppConfig::load();
    assert_eq!(config.env, Env::Local);
    assert_eq!(config.supabase_url, "http://127.0.0.1:8000");
    assert_eq!(config.supabase_anon_key, "local-anon");

    clear_env();
}

#[test]
#[serial]
fn test_load_production_reads_required_values() {
    clear_env();
    unsafe {
        std::env::set_var("APP_ENV", "production");
        std::env::set_var("SUPABASE_URL", "https://project.supabase.co");
        std::env::set_var("SUPABASE_ANON_KEY", "prod-anon");
    }

    let config = AppConfig::load();
    assert_eq!(config.env, Env::Production);
    assert_eq!(config.supabase_url, "https://project.supabase.co");
    assert_eq!(config.supabase_anon_key, "prod-anon");

    clear_env();
}
