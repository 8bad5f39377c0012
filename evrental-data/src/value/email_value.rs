use once_cell::sync::Lazy;
use regex::Regex;
use super::{BaseValue, InvalidValue};

define_value!(EmailValue, String, validate);

pub const EMAIL_MAX_LENGTH: usize = 254;

impl EmailValue {
  pub fn validate(val: &String) -> Result<(), InvalidValue> {
    if val.is_empty() {
      return Err(InvalidValue::Empty);
    }
    if val.chars().count() > EMAIL_MAX_LENGTH {
      return Err(InvalidValue::TooLong);
    }
    if extract_login(val).is_none() {
      return Err(InvalidValue::BadFormat)
    }
    Ok(())
  }
}

fn extract_login(input: &str) -> Option<&str> {
  static REGEX_EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<login>[^\s@]+)@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
  });
  REGEX_EMAIL.captures(input).and_then(|cap| {
    cap.name("login").map(|login| login.as_str())
  })
}

#[cfg(test)]
mod tests {
  use super::super::InvalidValue;
  use super::{extract_login, EmailValue};

  #[test]
  fn test_extract_login() {
    assert_eq!(extract_login(r"I❤email@example.com"), Some(r"I❤email"));
    assert_eq!(extract_login(r"sdf+sdsfsd.as.sdsd@jhkk.d.rl"), Some(r"sdf+sdsfsd.as.sdsd"));
    assert_eq!(extract_login(r"More@Than@One@at.com"), None);
    assert_eq!(extract_login(r"Not an email@email.com"), None);
    assert_eq!(extract_login(r"no-tld@localhost"), None);
  }

  #[test]
  fn test_good_email() {
    let email = EmailValue::try_new("a@b.com").unwrap();
    assert_eq!(email.val(), "a@b.com");
  }

  #[test]
  fn test_bad_email() {
    assert_eq!(EmailValue::try_new(""), Err(InvalidValue::Empty));
    assert_eq!(EmailValue::try_new("ab.com"), Err(InvalidValue::BadFormat));

    let long = format!("{}@evrental.vn", "a".repeat(250));
    assert_eq!(EmailValue::try_new(long), Err(InvalidValue::TooLong));
  }

  #[test]
  fn test_fromstr() {
    assert!(matches!("".parse::<EmailValue>(), Err(_)));
    assert!(matches!("notemail".parse::<EmailValue>(), Err(_)));
    assert_eq!("valid@email.com".parse::<EmailValue>().unwrap(), EmailValue::try_new("valid@email.com").unwrap());
  }
}
