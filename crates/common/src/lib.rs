pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn welcome_serializes_message() {
        let body = serde_json::to_value(types::Welcome::default()).unwrap();
        assert_eq!(body, serde_json::json!({"message": "ONE Aviation Resources API"}));
    }
}
