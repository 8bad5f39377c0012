#[derive(Debug, PartialEq, Clone, thiserror::Error)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize))]
pub enum IdError<TID: std::fmt::Debug> {
  #[error("cannot parse id from {0:?}")]
  CannotParse(String),
  #[error("id {0:?} was not reserved by this store")]
  IdNotReserved(TID),
  #[error("id {0:?} is missing")]
  IdMissing(TID),
  #[error("name {0:?} already exists")]
  NameAlreadyExists(String),
  #[error("no such name {0:?}")]
  NoSuchName(String),
}
