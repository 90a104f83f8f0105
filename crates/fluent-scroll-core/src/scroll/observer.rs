//! Synchronous notification of scroll progress.
//!
//! Engines and tweens return what changed from every call; an observer is an
//! optional sink those results can be delivered to on the calling thread.

/// Receives offset changes. Every method defaults to doing nothing.
pub trait ScrollObserver {
    /// The animated offset moved to `value`
    fn offset_changed(&mut self, _value: f64) {}

    /// A smoothing engine produced `delta` for one timer step
    fn offset_delta(&mut self, _delta: f64) {}

    /// Motion stopped: the tween finished or the engine ran out of gestures
    fn settled(&mut self) {}
}

impl ScrollObserver for () {}

/// Records every offset value it sees
impl ScrollObserver for Vec<f64> {
    fn offset_changed(&mut self, value: f64) {
        self.push(value);
    }
}

impl<O: ScrollObserver + ?Sized> ScrollObserver for &mut O {
    fn offset_changed(&mut self, value: f64) {
        (**self).offset_changed(value);
    }

    fn offset_delta(&mut self, delta: f64) {
        (**self).offset_delta(delta);
    }

    fn settled(&mut self) {
        (**self).settled();
    }
}
