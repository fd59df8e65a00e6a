use anyhow::{Result, bail};

/// Split a subject reference like `post:12` or `category:4` into kind and id
pub fn parse_subject_ref(subject_arg: &str) -> Result<(String, u64)> {
    let Some(colon_pos) = subject_arg.rfind(':') else {
        bail!("Expected <kind>:<id>, got '{}'", subject_arg);
    };

    let kind = subject_arg[..colon_pos].trim();
    let id_part = subject_arg[colon_pos + 1..].trim();

    if kind.is_empty() {
        bail!("Missing subject kind in '{}'", subject_arg);
    }
    match id_part.parse::<u64>() {
        Ok(id) => Ok((kind.to_string(), id)),
        Err(_) => bail!("Invalid id '{}' in '{}'", id_part, subject_arg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subject_ref() {
        assert_eq!(parse_subject_ref("post:12").unwrap(), ("post".to_string(), 12));
        assert_eq!(
            parse_subject_ref("post_tag: 3").unwrap(),
            ("post_tag".to_string(), 3)
        );
    }

    #[test]
    fn test_parse_subject_ref_errors() {
        assert!(parse_subject_ref("post").is_err());
        assert!(parse_subject_ref(":12").is_err());
        assert!(parse_subject_ref("post:abc").is_err());
        assert!(parse_subject_ref("post:-1").is_err());
    }
}
