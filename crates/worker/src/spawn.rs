use std::future::Future;
use std::sync::OnceLock;

use tokio::task::JoinHandle;

use crate::TaskClass;

fn runtime_handle() -> tokio::runtime::Handle {
	if let Ok(handle) = tokio::runtime::Handle::try_current() {
		return handle;
	}

	static GLOBAL_RT: OnceLock<tokio::runtime::Runtime> = OnceLock::new();
	let runtime = GLOBAL_RT.get_or_init(|| {
		tokio::runtime::Builder::new_multi_thread()
			.enable_all()
			.worker_threads(1)
			.thread_name("noteline-worker")
			.build()
			.expect("failed to build noteline-worker fallback runtime")
	});
	runtime.handle().clone()
}

/// Spawns an async task on the current runtime, or on a lazily built fallback
/// runtime when called outside one.
pub fn spawn<F>(class: TaskClass, fut: F) -> JoinHandle<F::Output>
where
	F: Future + Send + 'static,
	F::Output: Send + 'static,
{
	tracing::trace!(worker_class = class.as_str(), "worker.spawn");
	runtime_handle().spawn(fut)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn spawn_runs_on_current_runtime() {
		let handle = spawn(TaskClass::Background, async { 41 + 1 });
		assert_eq!(handle.await.unwrap(), 42);
	}

	#[test]
	fn spawn_outside_runtime_uses_fallback() {
		let handle = spawn(TaskClass::Interactive, async { "ok" });
		let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
		assert_eq!(rt.block_on(handle).unwrap(), "ok");
	}
}
