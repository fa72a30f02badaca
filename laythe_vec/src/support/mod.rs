use fnv::FnvBuildHasher;
use hashbrown::HashSet;
use std::{
  cell::{Cell, RefCell},
  fmt,
};

use crate::construct::{TryClone, TryDefault};

thread_local! {
  static LIVE: RefCell<HashSet<usize, FnvBuildHasher>> = RefCell::new(HashSet::default());
  static NEXT_ID: Cell<usize> = const { Cell::new(0) };
  static FAIL_AFTER: Cell<Option<usize>> = const { Cell::new(None) };
  static PANIC_AFTER: Cell<Option<usize>> = const { Cell::new(None) };
}

/// Number of `Tracked` values alive on this thread
pub fn live_count() -> usize {
  LIVE.with(|live| live.borrow().len())
}

/// An element that registers itself in a per thread ledger so tests can
/// spot leaked and doubly dropped values
pub struct Tracked {
  id: usize,
  pub value: i32,
}

impl Tracked {
  pub fn new(value: i32) -> Self {
    let id = NEXT_ID.with(|next| {
      let id = next.get();
      next.set(id + 1);
      id
    });

    LIVE.with(|live| assert!(live.borrow_mut().insert(id)));
    Self { id, value }
  }
}

impl Default for Tracked {
  fn default() -> Self {
    Tracked::new(0)
  }
}

impl Clone for Tracked {
  fn clone(&self) -> Self {
    Tracked::new(self.value)
  }
}

impl Drop for Tracked {
  fn drop(&mut self) {
    let removed = LIVE.with(|live| live.borrow_mut().remove(&self.id));
    assert!(removed, "tracked value {} dropped twice", self.id);
  }
}

impl PartialEq for Tracked {
  fn eq(&self, other: &Self) -> bool {
    self.value == other.value
  }
}

impl fmt::Debug for Tracked {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Tracked({})", self.value)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejected;

/// An element whose constructors can be told to fail
#[derive(Debug, PartialEq)]
pub struct Flaky(pub Tracked);

impl Flaky {
  /// Build a value directly, never failing
  pub fn new(value: i32) -> Self {
    Flaky(Tracked::new(value))
  }

  /// Let the next `count` constructions succeed and reject the one after
  pub fn fail_after(count: usize) {
    FAIL_AFTER.with(|fail| fail.set(Some(count)));
  }

  /// Stop any pending failure
  pub fn disarm() {
    FAIL_AFTER.with(|fail| fail.set(None));
  }

  fn attempt() -> Result<(), Rejected> {
    FAIL_AFTER.with(|fail| match fail.get() {
      None => Ok(()),
      Some(0) => {
        fail.set(None);
        Err(Rejected)
      }
      Some(count) => {
        fail.set(Some(count - 1));
        Ok(())
      }
    })
  }
}

impl TryDefault for Flaky {
  type Error = Rejected;

  fn try_default() -> Result<Self, Self::Error> {
    Flaky::attempt()?;
    Ok(Flaky::new(0))
  }
}

impl TryClone for Flaky {
  type Error = Rejected;

  fn try_clone(&self) -> Result<Self, Self::Error> {
    Flaky::attempt()?;
    Ok(Flaky::new(self.0.value))
  }
}

/// An element whose `Clone` can be told to panic
#[derive(Debug, Default, PartialEq)]
pub struct Bomb(pub Tracked);

impl Bomb {
  pub fn new(value: i32) -> Self {
    Bomb(Tracked::new(value))
  }

  /// Let the next `count` clones succeed and panic on the one after
  pub fn arm(count: usize) {
    PANIC_AFTER.with(|after| after.set(Some(count)));
  }

  pub fn disarm() {
    PANIC_AFTER.with(|after| after.set(None));
  }
}

impl Clone for Bomb {
  fn clone(&self) -> Self {
    let explode = PANIC_AFTER.with(|after| match after.get() {
      None => false,
      Some(0) => {
        after.set(None);
        true
      }
      Some(count) => {
        after.set(Some(count - 1));
        false
      }
    });

    if explode {
      panic!("bomb cloned while armed");
    }

    Bomb(self.0.clone())
  }
}
