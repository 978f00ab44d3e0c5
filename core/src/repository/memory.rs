use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use anyhow::Result;
use serde_json::Value;

use crate::repository::traits::KeyValueStore;

/// In-process store. Clones share the same map.
#[derive(Clone, Default, Debug)]
pub struct MemoryStore {
    values: Rc<RefCell<BTreeMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn put_value(&self, key: &str, value: Value) -> Result<()> {
        self.values.borrow_mut().insert(key.to_string(), value);
        Ok(())
    }

    fn get_value(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<BTreeSet<String>> {
        Ok(self.values.borrow().keys().cloned().collect())
    }

    fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.values.borrow().contains_key(key))
    }
}
