use std::hash::Hash;
use std::collections::HashMap;
use super::IdError;

pub trait ObjectStoreContent {
  type IdType;
  fn new_id(id_val: u32) -> Self::IdType;
  fn id(&self) -> &Self::IdType;
}

/// A store for objects that are referenced by an ID and a unique name.
///
/// The store hands out IDs itself: [`insert_new_named`](ObjectStore::insert_new_named) passes
/// the next ID to a closure that builds the object around it.
///
/// # Examples
/// ```
/// # use evrental_base::{ObjectStore, ObjectStoreContent, generate_id_type};
/// # generate_id_type!(ObjectId);
/// # struct Object { id: ObjectId }
/// # impl ObjectStoreContent for Object {
/// #   type IdType = ObjectId;
/// #   fn new_id(id_val: u32) -> Self::IdType { ObjectId::new(id_val) }
/// #   fn id(&self) -> &Self::IdType { &self.id }
/// # }
/// let mut store = ObjectStore::new();
/// let object_id = store.insert_new_named("documents", |id| Ok(Object { id })).unwrap();
///
/// // get the object either by ID or name
/// assert!(store.get(&object_id).is_some());
/// assert!(store.get_by_name("documents").is_some());
/// ```
#[derive(Debug)]
pub struct ObjectStore<T, TID>
    where TID: Eq + Hash
{
  id_to_object: HashMap<TID, T>,
  name_to_id: HashMap<String, TID>,
  next_id: u32,
}

impl<T, TID> ObjectStore<T, TID>
    where T: ObjectStoreContent<IdType = TID>,
          TID: Eq + Hash + Clone + std::fmt::Debug,
{
  pub fn new() -> Self {
    Self::with_capacity(0)
  }

  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      id_to_object: HashMap::with_capacity(capacity),
      name_to_id: HashMap::with_capacity(capacity),
      next_id: 0,
    }
  }

  /// Build an object around the next free ID and store it under `name`.
  ///
  /// The object must keep the ID given to the closure.
  pub fn insert_new_named<CB, STR>(&mut self, name: STR, cb: CB) -> Result<TID, IdError<TID>>
      where CB: FnOnce(TID) -> Result<T, IdError<TID>>,
            STR: Into<String>
  {
    let name = name.into();
    if self.name_to_id.contains_key(&name) {
      return Err(IdError::NameAlreadyExists(name));
    }
    let id = T::new_id(self.next_id);
    let object = cb(id.clone())?;
    if *object.id() != id {
      return Err(IdError::IdNotReserved(object.id().clone()));
    }
    self.next_id += 1;
    self.id_to_object.insert(id.clone(), object);
    self.name_to_id.insert(name, id.clone());
    Ok(id)
  }

  pub fn id_from_name(&self, name: &str) -> Option<&TID> {
    self.name_to_id.get(name)
  }

  pub fn get_by_name(&self, name: &str) -> Option<&T> {
    self.id_from_name(name).and_then(|id| self.get(id))
  }

  pub fn get(&self, id: &TID) -> Option<&T> {
    self.id_to_object.get(id)
  }

  pub fn get_mut(&mut self, id: &TID) -> Option<&mut T> {
    self.id_to_object.get_mut(id)
  }

  /// Like [`get`](ObjectStore::get) but reports a missing object as an [`IdError`]
  pub fn try_get(&self, id: &TID) -> Result<&T, IdError<TID>> {
    self.get(id).ok_or_else(|| IdError::IdMissing(id.clone()))
  }

  /// Like [`get_by_name`](ObjectStore::get_by_name) but reports a missing name as an [`IdError`]
  pub fn try_get_by_name(&self, name: &str) -> Result<&T, IdError<TID>> {
    self.get_by_name(name).ok_or_else(|| IdError::NoSuchName(name.to_owned()))
  }

  pub fn len(&self) -> usize {
    self.id_to_object.len()
  }

  pub fn is_empty(&self) -> bool {
    self.id_to_object.is_empty()
  }

  /// Iterator over all stored objects, in no particular order
  pub fn iter(&self) -> impl Iterator<Item = &T> {
    self.id_to_object.values()
  }
}

impl<T, TID> Default for ObjectStore<T, TID>
    where T: ObjectStoreContent<IdType = TID>,
          TID: Eq + Hash + Clone + std::fmt::Debug,
{
  fn default() -> Self {
    Self::new()
  }
}


#[cfg(test)]
mod tests {
  use super::ObjectStore;
  use crate::{test::TestObject, test::TestObjectId, IdError};

  #[test]
  fn ids_are_handed_out() {
    let mut test_store: ObjectStore<TestObject, TestObjectId> = ObjectStore::new();
    let t1 = test_store.insert_new_named("t1", |id| Ok(TestObject::new(id, 100))).unwrap();
    let t2 = test_store.insert_new_named("t2", |id| Ok(TestObject::new(id, 200))).unwrap();
    assert_ne!(t1, t2);
    assert_eq!(test_store.get(&t1).unwrap().val(), 100);
    assert_eq!(test_store.get(&TestObjectId::new(999)), None);
    assert_eq!(test_store.len(), 2);

    // don't allow custom ids
    let testid_bad = TestObjectId::new(1000);
    let t_custom = test_store.insert_new_named("t3", |_id| Ok(TestObject::new(testid_bad, 10)));
    assert_eq!(t_custom, Err(IdError::IdNotReserved(testid_bad)));

    // callback failure
    assert_eq!(
      test_store.insert_new_named("t3", |_id| Err(IdError::CannotParse("hi".to_owned()))),
      Err(IdError::CannotParse("hi".to_owned())));
    assert_eq!(test_store.len(), 2);
    assert_eq!(test_store.get_by_name("t3"), None);
  }

  #[test]
  fn names() {
    let mut test_store: ObjectStore<TestObject, TestObjectId> = ObjectStore::new();
    let t1 = test_store.insert_new_named("t1", |id| Ok(TestObject::new(id, 100))).unwrap();

    let t1_dupe = test_store.insert_new_named("t1", |id| Ok(TestObject::new(id, 150)));
    assert_eq!(t1_dupe, Err(IdError::NameAlreadyExists("t1".to_owned())));
    assert_eq!(test_store.len(), 1);

    assert_eq!(test_store.id_from_name("t1"), Some(&t1));
    assert_eq!(test_store.get_by_name("t1").unwrap().val(), 100);
    assert_eq!(test_store.get_by_name("BAD"), None);
    assert_eq!(test_store.try_get_by_name("BAD"), Err(IdError::NoSuchName("BAD".to_owned())));
    assert_eq!(test_store.try_get(&TestObjectId::new(999)), Err(IdError::IdMissing(TestObjectId::new(999))));
  }

  #[test]
  fn get_mut() {
    let mut test_store: ObjectStore<TestObject, TestObjectId> = ObjectStore::new();
    let t1 = test_store.insert_new_named("t1", |id| Ok(TestObject::new(id, 100))).unwrap();
    test_store.get_mut(&t1).unwrap().set_val(5);
    assert_eq!(test_store.iter().map(TestObject::val).collect::<Vec<_>>(), vec![5]);
  }
}
