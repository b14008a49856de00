use crate::utils::error::{EtlError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 多個互斥旗標中必須恰好啟用一個，回傳被啟用的旗標名稱
pub fn validate_exactly_one<'a>(field_name: &str, flags: &[(&'a str, bool)]) -> Result<&'a str> {
    let enabled: Vec<&'a str> = flags
        .iter()
        .filter(|(_, on)| *on)
        .map(|(name, _)| *name)
        .collect();

    match enabled.as_slice() {
        [single] => Ok(*single),
        [] => Err(EtlError::InvalidArgumentError {
            field: field_name.to_string(),
            reason: format!(
                "one of {} is required",
                flags
                    .iter()
                    .map(|(name, _)| *name)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }),
        many => Err(EtlError::InvalidArgumentError {
            field: field_name.to_string(),
            reason: format!("{} cannot be used together", many.join(", ")),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_exactly_one() {
        let picked = validate_exactly_one("mode", &[("--a", false), ("--b", true)]).unwrap();
        assert_eq!(picked, "--b");

        assert!(validate_exactly_one("mode", &[("--a", false), ("--b", false)]).is_err());
        assert!(validate_exactly_one("mode", &[("--a", true), ("--b", true)]).is_err());
    }

    #[test]
    fn test_validate_exactly_one_messages() {
        let err = validate_exactly_one("mode", &[("--a", true), ("--b", true)]).unwrap_err();
        assert!(err.to_string().contains("--a, --b cannot be used together"));

        let err = validate_exactly_one("mode", &[("--a", false), ("--b", false)]).unwrap_err();
        assert!(err.to_string().contains("one of --a, --b is required"));
    }
}
