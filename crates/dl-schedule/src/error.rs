use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("restaurant \"{restaurant}\" is not in the restaurant template")]
    UnknownRestaurant { restaurant: String },
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
