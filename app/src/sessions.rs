// bistro/app/src/sessions.rs

//! Per-visitor state: one cart and the two forms in progress, keyed by the
//! `X-Session-ID` header. Sessions left idle are evicted by a background
//! sweep.

use bistro_core::{CartStore, OrderForm, ReservationForm};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct Session {
  pub cart: CartStore,
  pub order_form: OrderForm,
  pub reservation_form: ReservationForm,
}

struct Slot {
  session: Session,
  last_touched: Instant,
}

impl Slot {
  fn new() -> Self {
    Slot {
      session: Session::default(),
      last_touched: Instant::now(),
    }
  }
}

#[derive(Default)]
pub struct SessionStore {
  sessions: RwLock<HashMap<Uuid, Arc<Mutex<Slot>>>>,
}

impl SessionStore {
  pub fn new() -> Self {
    Self::default()
  }

  fn existing(&self, id: Uuid) -> Option<Arc<Mutex<Slot>>> {
    self.sessions.read().get(&id).map(Arc::clone)
  }

  fn entry(&self, id: Uuid) -> Arc<Mutex<Slot>> {
    if let Some(slot) = self.existing(id) {
      return slot;
    }
    Arc::clone(self.sessions.write().entry(id).or_insert_with(|| Arc::new(Mutex::new(Slot::new()))))
  }

  /// Runs `f` on the session, creating it on first use. `f` must not block;
  /// the session stays locked while it runs.
  pub fn with_session<R>(&self, id: Uuid, f: impl FnOnce(&mut Session) -> R) -> R {
    let slot = self.entry(id);
    let mut guard = slot.lock();
    guard.last_touched = Instant::now();
    f(&mut guard.session)
  }

  /// Runs `f` on the session if it exists, or on an empty one otherwise.
  /// Never creates an entry.
  pub fn read_session<R>(&self, id: Uuid, f: impl FnOnce(&Session) -> R) -> R {
    match self.existing(id) {
      Some(slot) => {
        let mut guard = slot.lock();
        guard.last_touched = Instant::now();
        f(&guard.session)
      }
      None => f(&Session::default()),
    }
  }

  /// Copy of the session's current state.
  pub fn snapshot(&self, id: Uuid) -> Session {
    self.read_session(id, Session::clone)
  }

  /// Drops sessions untouched for longer than `max_idle` as of `now`.
  /// Sessions a running request holds are kept. Returns how many went.
  pub fn evict_idle(&self, now: Instant, max_idle: Duration) -> usize {
    let mut sessions = self.sessions.write();
    let before = sessions.len();
    sessions.retain(|_, slot| {
      if Arc::strong_count(slot) > 1 {
        return true;
      }
      match slot.try_lock() {
        Some(guard) => now.saturating_duration_since(guard.last_touched) <= max_idle,
        None => true,
      }
    });
    before - sessions.len()
  }

  /// Evicts idle sessions every `interval` until the returned task is aborted.
  pub fn spawn_idle_sweeper(self: &Arc<Self>, interval: Duration, max_idle: Duration) -> JoinHandle<()> {
    let store = Arc::clone(self);
    tokio::spawn(async move {
      let mut ticker = tokio::time::interval(interval);
      loop {
        ticker.tick().await;
        let evicted = store.evict_idle(Instant::now(), max_idle);
        if evicted > 0 {
          info!(evicted, remaining = store.len(), "Evicted idle sessions.");
        } else {
          debug!(remaining = store.len(), "No idle sessions to evict.");
        }
      }
    })
  }

  pub fn len(&self) -> usize {
    self.sessions.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.sessions.read().is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sessions_are_isolated_and_created_on_first_write() {
    let store = SessionStore::new();
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    assert!(store.is_empty());

    store.with_session(a, |s| s.order_form.name = "Ada".to_string());
    assert_eq!(store.snapshot(a).order_form.name, "Ada");
    assert_eq!(store.snapshot(b).order_form.name, "");
    assert_eq!(store.len(), 1);
  }

  #[test]
  fn reads_of_unknown_sessions_do_not_create_entries() {
    let store = SessionStore::new();
    for _ in 0..100 {
      let empty = store.read_session(Uuid::new_v4(), |s| s.cart.is_empty());
      assert!(empty);
    }
    assert!(store.is_empty());
  }

  #[test]
  fn idle_sessions_are_evicted_and_active_ones_kept() {
    let store = SessionStore::new();
    let (idle, active) = (Uuid::new_v4(), Uuid::new_v4());
    store.with_session(idle, |s| s.order_form.name = "Idle".to_string());
    store.with_session(active, |s| s.order_form.name = "Active".to_string());

    let max_idle = Duration::from_secs(30 * 60);
    assert_eq!(store.evict_idle(Instant::now(), max_idle), 0);

    let later = Instant::now() + max_idle + Duration::from_secs(1);
    store.existing(active).unwrap().lock().last_touched = later;
    assert_eq!(store.evict_idle(later, max_idle), 1);
    assert_eq!(store.len(), 1);
    assert_eq!(store.snapshot(active).order_form.name, "Active");
    assert_eq!(store.snapshot(idle).order_form.name, "");
  }

  #[test]
  fn sessions_in_use_survive_a_sweep() {
    let store = SessionStore::new();
    let id = Uuid::new_v4();
    store.with_session(id, |_| ());
    let slot = store.existing(id).unwrap();
    let _held = slot.lock();

    let far_future = Instant::now() + Duration::from_secs(24 * 60 * 60);
    assert_eq!(store.evict_idle(far_future, Duration::from_secs(1)), 0);
    assert_eq!(store.len(), 1);
  }
}
