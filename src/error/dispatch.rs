use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Dispatcher is already {phase}; a dispatcher runs only once.")]
    AlreadyStarted { phase: &'static str },
}
