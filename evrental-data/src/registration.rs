use super::{InvalidValue, InvalidVars, StateData};
use super::value::{EmailValue, PasswordValue, PhoneValue, UsernameValue};

/// The sign-up form. [`validate`](RegistrationFields::validate) is the single rule set used by
/// both the registration flow and the session manager.
#[derive(Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(rename_all = "camelCase"))]
pub struct RegistrationFields {
  pub username: String,
  pub email: String,
  pub password: String,
  pub confirm_password: String,
  pub contact_number: String,
}

impl RegistrationFields {
  pub const USERNAME: &'static str = "username";
  pub const EMAIL: &'static str = "email";
  pub const PASSWORD: &'static str = "password";
  pub const CONFIRM_PASSWORD: &'static str = "confirmPassword";
  pub const CONTACT_NUMBER: &'static str = "contactNumber";

  /// Check every field, reporting all failures at once
  ///
  /// # Examples
  /// ```
  /// # use evrental_data::{InvalidValue, RegistrationFields};
  /// let fields = RegistrationFields {
  ///   username: "an".to_owned(),
  ///   email: "an@evrental.vn".to_owned(),
  ///   password: "Charge2026".to_owned(),
  ///   confirm_password: "Charge2025".to_owned(),
  ///   contact_number: "0901234567".to_owned(),
  /// };
  /// let invalid = fields.validate().unwrap_err();
  /// assert_eq!(invalid.get("username"), Some(&InvalidValue::TooShort));
  /// assert_eq!(invalid.get("confirmPassword"), Some(&InvalidValue::Mismatch));
  /// ```
  pub fn validate(&self) -> Result<(), InvalidVars> {
    let mut invalid = InvalidVars::new();
    if let Err(e) = UsernameValue::validate(&self.username) {
      invalid.insert(Self::USERNAME, e);
    }
    if let Err(e) = EmailValue::validate(&self.email) {
      invalid.insert(Self::EMAIL, e);
    }
    if let Err(e) = PasswordValue::validate(&self.password) {
      invalid.insert(Self::PASSWORD, e);
    }
    if self.confirm_password.is_empty() {
      invalid.insert(Self::CONFIRM_PASSWORD, InvalidValue::Empty);
    } else if self.confirm_password != self.password {
      invalid.insert(Self::CONFIRM_PASSWORD, InvalidValue::Mismatch);
    }
    if let Err(e) = PhoneValue::validate(&self.contact_number) {
      invalid.insert(Self::CONTACT_NUMBER, e);
    }
    invalid.into_result()
  }

  /// Read the form out of flow data. Missing or non-string entries become empty strings.
  pub fn from_state_data(data: &StateData) -> Self {
    let field = |name: &str| data.get_str(name).unwrap_or_default().to_owned();
    RegistrationFields {
      username: field(Self::USERNAME),
      email: field(Self::EMAIL),
      password: field(Self::PASSWORD),
      confirm_password: field(Self::CONFIRM_PASSWORD),
      contact_number: field(Self::CONTACT_NUMBER),
    }
  }

  pub fn into_state_data(self) -> StateData {
    StateData::new()
      .with(Self::USERNAME, self.username)
      .with(Self::EMAIL, self.email)
      .with(Self::PASSWORD, self.password)
      .with(Self::CONFIRM_PASSWORD, self.confirm_password)
      .with(Self::CONTACT_NUMBER, self.contact_number)
  }
}

impl std::fmt::Debug for RegistrationFields {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("RegistrationFields")
      .field("username", &self.username)
      .field("email", &self.email)
      .field("password", &"***")
      .field("confirm_password", &"***")
      .field("contact_number", &self.contact_number)
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use crate::{InvalidValue, StateData};
  use super::RegistrationFields;

  fn good() -> RegistrationFields {
    RegistrationFields {
      username: "minhanh".to_owned(),
      email: "minhanh@evrental.vn".to_owned(),
      password: "Charge2026".to_owned(),
      confirm_password: "Charge2026".to_owned(),
      contact_number: "0901234567".to_owned(),
    }
  }

  #[test]
  fn valid() {
    assert_eq!(good().validate(), Ok(()));
  }

  #[test]
  fn reports_every_field() {
    let invalid = RegistrationFields::default().validate().unwrap_err();
    assert_eq!(invalid.len(), 5);
    assert_eq!(invalid.get("username"), Some(&InvalidValue::Empty));
    assert_eq!(invalid.get("email"), Some(&InvalidValue::Empty));
    assert_eq!(invalid.get("password"), Some(&InvalidValue::Empty));
    assert_eq!(invalid.get("confirmPassword"), Some(&InvalidValue::Empty));
    assert_eq!(invalid.get("contactNumber"), Some(&InvalidValue::Empty));
  }

  #[test]
  fn confirm_mismatch() {
    let mut fields = good();
    fields.confirm_password = "Charge2025".to_owned();
    let invalid = fields.validate().unwrap_err();
    assert_eq!(invalid.len(), 1);
    assert_eq!(invalid.get("confirmPassword"), Some(&InvalidValue::Mismatch));
  }

  #[test]
  fn state_data_round_trip() {
    let data = good().into_state_data();
    assert_eq!(data.get_str("confirmPassword"), Some("Charge2026"));
    assert_eq!(RegistrationFields::from_state_data(&data), good());

    let partial = StateData::new().with("username", "minhanh").with("email", true);
    let fields = RegistrationFields::from_state_data(&partial);
    assert_eq!(fields.username, "minhanh");
    assert_eq!(fields.email, "");
  }

  #[test]
  fn debug_hides_passwords() {
    let printed = format!("{:?}", good());
    assert!(!printed.contains("Charge2026"));
    assert!(printed.contains("minhanh"));
  }
}
