use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::prelude::*;

use super::error::ClusterError;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A `requestAnimationFrame` loop that re-schedules itself every frame until
/// stopped or dropped.
pub struct FrameLoop {
	callback: FrameCallback,
	pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
	pub fn start(mut tick: impl FnMut() + 'static) -> Result<Self, ClusterError> {
		let callback: FrameCallback = Rc::new(RefCell::new(None));
		let pending = Rc::new(Cell::new(None));
		let (callback_inner, pending_inner) = (callback.clone(), pending.clone());

		let closure: Closure<dyn FnMut()> = Closure::new(move || {
			pending_inner.set(None);
			tick();
			if let Some(ref cb) = *callback_inner.borrow() {
				match schedule(cb) {
					Ok(handle) => pending_inner.set(Some(handle)),
					Err(err) => warn!("frame loop halted: {err}"),
				}
			}
		});
		pending.set(Some(schedule(&closure)?));
		*callback.borrow_mut() = Some(closure);

		debug!("frame loop started");
		Ok(Self { callback, pending })
	}

	/// Cancel the pending frame and release the callback.
	pub fn stop(&self) {
		if let Some(handle) = self.pending.take() {
			if let Some(window) = web_sys::window() {
				let _ = window.cancel_animation_frame(handle);
			}
		}
		if self.callback.borrow_mut().take().is_some() {
			debug!("frame loop stopped");
		}
	}
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		self.stop();
	}
}

fn schedule(cb: &Closure<dyn FnMut()>) -> Result<i32, ClusterError> {
	web_sys::window()
		.ok_or_else(|| ClusterError::Browser("no global window".into()))?
		.request_animation_frame(cb.as_ref().unchecked_ref())
		.map_err(ClusterError::browser)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
	use wasm_bindgen_futures::JsFuture;
	use wasm_bindgen_test::*;

	use super::*;

	wasm_bindgen_test_configure!(run_in_browser);

	/// Waits out `count` animation frames.
	async fn frames(count: u32) {
		for _ in 0..count {
			let next = js_sys::Promise::new(&mut |resolve, _reject| {
				web_sys::window()
					.unwrap()
					.request_animation_frame(&resolve)
					.unwrap();
			});
			JsFuture::from(next).await.unwrap();
		}
	}

	fn counting_loop() -> (FrameLoop, Rc<Cell<u32>>) {
		let ticks = Rc::new(Cell::new(0));
		let counter = ticks.clone();
		let frame_loop = FrameLoop::start(move || counter.set(counter.get() + 1)).unwrap();
		(frame_loop, ticks)
	}

	#[wasm_bindgen_test]
	async fn ticks_every_frame_until_dropped() {
		let (frame_loop, ticks) = counting_loop();
		frames(5).await;
		assert!(ticks.get() >= 3, "only {} ticks", ticks.get());

		drop(frame_loop);
		let after_drop = ticks.get();
		frames(5).await;
		assert_eq!(ticks.get(), after_drop);
	}

	#[wasm_bindgen_test]
	async fn stop_cancels_pending_frame_and_is_idempotent() {
		let (frame_loop, ticks) = counting_loop();
		frame_loop.stop();
		assert!(frame_loop.pending.get().is_none());
		assert!(frame_loop.callback.borrow().is_none());

		frames(3).await;
		assert_eq!(ticks.get(), 0);

		frame_loop.stop();
		drop(frame_loop);
		frames(2).await;
		assert_eq!(ticks.get(), 0);
	}
}
