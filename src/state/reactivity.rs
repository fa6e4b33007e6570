// ============================================================================
// REACTIVITY - Observable values with subscriber notification
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

type Callback<T> = Rc<dyn Fn(&T)>;

/// Shared value that notifies its subscribers after every mutation.
/// Clones share both the value and the subscriber list.
pub struct Observable<T> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<RefCell<Vec<Callback<T>>>>,
}

impl<T: Clone + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Borrows the value without cloning it
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    pub fn update(&self, updater: impl FnOnce(&mut T)) {
        updater(&mut self.value.borrow_mut());
        self.notify();
    }

    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Read-only handle for consumers outside the owning store
    pub fn watch(&self) -> Watch<T> {
        Watch { inner: self.clone() }
    }

    // Callbacks get a snapshot, so they may read or even set this value.
    fn notify(&self) {
        let snapshot = self.get();
        let subscribers: Vec<Callback<T>> = self.subscribers.borrow().clone();
        for callback in subscribers {
            callback(&snapshot);
        }
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            subscribers: self.subscribers.clone(),
        }
    }
}

impl<T: Default + Clone + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Read and subscribe access to an [`Observable`]
pub struct Watch<T> {
    inner: Observable<T>,
}

impl<T: Clone + 'static> Watch<T> {
    pub fn get(&self) -> T {
        self.inner.get()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.inner.with(f)
    }

    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) {
        self.inner.subscribe(callback);
    }
}

impl<T> Clone for Watch<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Raises a loading flag and lowers it again when dropped, on every exit
/// path of the action holding it.
pub struct LoadingGuard {
    flag: Observable<bool>,
}

impl LoadingGuard {
    pub fn engage(flag: &Observable<bool>) -> Self {
        flag.set(true);
        Self { flag: flag.clone() }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}
