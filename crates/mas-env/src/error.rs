use mas_core::ObjectId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("cannot register body {body}: the simulation has already started")]
    SimulationStarted { body: ObjectId },

    #[error("a body with id {0} is already registered")]
    DuplicateBody(ObjectId),
}

pub type EnvResult<T> = Result<T, EnvError>;
