pub type TaskID = usize;

/// One unit of pipeline work. Returning `false` ends the task.
pub trait SteppableTask: Send + 'static {
    fn step(&mut self) -> bool;
}

/// Runs each task on its own named thread until it finishes or is told to stop.
pub struct ThreadManager {
    next_task_id: TaskID,
    tasks: std::collections::HashMap<TaskID, ManagedTask>,
}

impl ThreadManager {
    #[must_use]
    pub fn new() -> Self {
        ThreadManager {
            next_task_id: 0,
            tasks: std::collections::HashMap::new(),
        }
    }

    /// Spawns `task` on a dedicated thread.
    ///
    /// A zero `period` steps the task back to back; otherwise steps are
    /// spaced `period` apart and a stop request cuts the wait short.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the thread cannot be spawned.
    pub fn add_task<T>(&mut self, task: T, period: std::time::Duration) -> std::io::Result<TaskID>
    where
        T: SteppableTask,
    {
        let id = self.next_task_id;
        let (stop_sender, stop_receiver) = crossbeam_channel::bounded::<()>(1);
        let name = task_name::<T>();

        let handle = std::thread::Builder::new()
            .name(name.clone())
            .spawn(move || {
                if period.is_zero() {
                    run_task_continuously(task, &stop_receiver);
                } else {
                    run_task_with_period(task, period, &stop_receiver);
                }
                log::info!("ThreadManager: task {name} finished");
            })?;

        self.tasks.insert(
            id,
            ManagedTask {
                handle,
                stop_sender,
            },
        );
        self.next_task_id += 1;
        Ok(id)
    }

    pub fn stop_all_tasks(&self) {
        log::info!("ThreadManager: signalling all tasks to stop");
        for task in self.tasks.values() {
            let _ = task.stop_sender.try_send(());
        }
    }

    pub fn wait_on_task_finish(&mut self, task_id: TaskID) {
        if let Some(task) = self.tasks.remove(&task_id) {
            if task.handle.join().is_err() {
                log::error!("ThreadManager: task {task_id} panicked");
            }
        }
    }
}

impl Default for ThreadManager {
    fn default() -> Self {
        ThreadManager::new()
    }
}

// `crate::decoder::SentenceDecoderTask<..>` -> `SentenceDecoderTask`
fn task_name<T>() -> String {
    let full_name = std::any::type_name::<T>();
    let without_generics = full_name.split('<').next().unwrap_or(full_name);
    without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics)
        .to_string()
}

fn run_task_continuously<T: SteppableTask>(
    mut task: T,
    stop_receiver: &crossbeam_channel::Receiver<()>,
) {
    loop {
        match stop_receiver.try_recv() {
            Ok(()) | Err(crossbeam_channel::TryRecvError::Disconnected) => break,
            Err(crossbeam_channel::TryRecvError::Empty) => {}
        }
        if !task.step() {
            break;
        }
    }
}

fn run_task_with_period<T: SteppableTask>(
    mut task: T,
    period: std::time::Duration,
    stop_receiver: &crossbeam_channel::Receiver<()>,
) {
    let mut next_run = std::time::Instant::now();
    loop {
        if !task.step() {
            break;
        }

        next_run += period;
        let now = std::time::Instant::now();

        if next_run > now {
            match stop_receiver.recv_timeout(next_run - now) {
                Ok(()) | Err(crossbeam_channel::RecvTimeoutError::Disconnected) => break,
                Err(crossbeam_channel::RecvTimeoutError::Timeout) => {}
            }
        } else {
            // Behind schedule: restart the cadence from now.
            log::debug!("ThreadManager: task overran its period");
            next_run = now;
            if let Ok(()) = stop_receiver.try_recv() {
                break;
            }
        }
    }
}

struct ManagedTask {
    handle: std::thread::JoinHandle<()>,
    stop_sender: crossbeam_channel::Sender<()>,
}

#[cfg(test)]
mod tests {
    use super::{SteppableTask, ThreadManager};

    // Forwards a fixed number of items, then finishes on its own.
    struct BoundedTask {
        remaining: usize,
        sender: crossbeam_channel::Sender<usize>,
    }

    impl SteppableTask for BoundedTask {
        fn step(&mut self) -> bool {
            self.remaining -= 1;
            self.sender.send(self.remaining).unwrap();
            self.remaining > 0
        }
    }

    // Never finishes by itself.
    struct EndlessTask {
        sender: crossbeam_channel::Sender<()>,
    }

    impl SteppableTask for EndlessTask {
        fn step(&mut self) -> bool {
            let _ = self.sender.send(());
            true
        }
    }

    #[test]
    fn when_task_type_is_generic_then_thread_name_is_its_bare_type_name() {
        assert_eq!(super::task_name::<BoundedTask>(), "BoundedTask");
        assert_eq!(super::task_name::<Vec<BoundedTask>>(), "Vec");
    }

    #[test]
    fn when_tasks_finish_on_their_own_then_every_step_ran() {
        let mut manager = ThreadManager::new();
        let (sender_1, receiver_1) = crossbeam_channel::unbounded();
        let (sender_2, receiver_2) = crossbeam_channel::unbounded();

        let task_1 = manager
            .add_task(
                BoundedTask {
                    remaining: 5,
                    sender: sender_1,
                },
                std::time::Duration::from_millis(10),
            )
            .unwrap();
        let task_2 = manager
            .add_task(
                BoundedTask {
                    remaining: 3,
                    sender: sender_2,
                },
                std::time::Duration::ZERO,
            )
            .unwrap();

        manager.wait_on_task_finish(task_2);
        manager.wait_on_task_finish(task_1);

        assert!(manager.tasks.is_empty());
        assert_eq!(receiver_1.try_iter().count(), 5);
        assert_eq!(receiver_2.try_iter().collect::<Vec<_>>(), vec![2, 1, 0]);
    }

    #[test]
    fn when_stop_all_tasks_is_called_then_endless_tasks_end() {
        let mut manager = ThreadManager::new();
        let (sender, receiver) = crossbeam_channel::unbounded();

        let periodic = manager
            .add_task(
                EndlessTask {
                    sender: sender.clone(),
                },
                std::time::Duration::from_millis(20),
            )
            .unwrap();
        let continuous = manager
            .add_task(EndlessTask { sender }, std::time::Duration::ZERO)
            .unwrap();

        std::thread::sleep(std::time::Duration::from_millis(50));
        manager.stop_all_tasks();
        manager.wait_on_task_finish(periodic);
        manager.wait_on_task_finish(continuous);

        assert!(manager.tasks.is_empty());
        assert!(receiver.try_iter().count() > 0);
    }

    #[test]
    fn when_one_task_is_waited_on_then_only_it_is_removed() {
        let mut manager = ThreadManager::new();
        let (sender, _receiver) = crossbeam_channel::unbounded();

        let first = manager
            .add_task(
                EndlessTask {
                    sender: sender.clone(),
                },
                std::time::Duration::from_millis(20),
            )
            .unwrap();
        let second = manager
            .add_task(EndlessTask { sender }, std::time::Duration::from_millis(20))
            .unwrap();

        manager.stop_all_tasks();
        manager.wait_on_task_finish(first);

        assert_eq!(manager.tasks.len(), 1);
        assert!(manager.tasks.contains_key(&second));

        manager.wait_on_task_finish(second);
        assert!(manager.tasks.is_empty());
    }
}
