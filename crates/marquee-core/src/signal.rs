use std::cell::RefCell;
use std::rc::Rc;

pub type SubId = usize;

/// Observable, reactive value. Cloning shares the same storage.
///
/// Subscribers run synchronously on the calling thread when the value is
/// written. Re-entrant writes from inside a subscriber are not supported.
#[derive(Clone)]
pub struct Signal<T: 'static>(Rc<RefCell<Inner<T>>>);

struct Inner<T> {
    value: T,
    next_sub: SubId,
    subs: Vec<(SubId, Rc<dyn Fn(&T)>)>,
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(Inner {
            value,
            next_sub: 0,
            subs: Vec::new(),
        })))
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.borrow().value.clone()
    }

    /// Read the value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.borrow().value)
    }

    pub fn set(&self, v: T) {
        self.0.borrow_mut().value = v;
        self.notify();
    }

    pub fn update<F: FnOnce(&mut T)>(&self, f: F) {
        f(&mut self.0.borrow_mut().value);
        self.notify();
    }

    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubId {
        let mut inner = self.0.borrow_mut();
        let id = inner.next_sub;
        inner.next_sub += 1;
        inner.subs.push((id, Rc::new(f)));
        id
    }

    pub fn unsubscribe(&self, id: SubId) {
        self.0.borrow_mut().subs.retain(|(sub, _)| *sub != id);
    }

    fn notify(&self) {
        let subs: Vec<Rc<dyn Fn(&T)>> = self
            .0
            .borrow()
            .subs
            .iter()
            .map(|(_, f)| f.clone())
            .collect();
        let inner = self.0.borrow();
        for f in &subs {
            f(&inner.value);
        }
    }
}

pub fn signal<T>(t: T) -> Signal<T> {
    Signal::new(t)
}

/// Detaches a subscription when dropped.
pub struct Subscription(Option<Box<dyn FnOnce()>>);

impl Subscription {
    pub fn new(detach: impl FnOnce() + 'static) -> Self {
        Self(Some(Box::new(detach)))
    }

    /// Keep the subscription alive for the life of the signal.
    pub fn forget(mut self) {
        self.0 = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(f) = self.0.take() {
            f()
        }
    }
}
