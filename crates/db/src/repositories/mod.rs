mod activity_repo;
mod workout_repo;

pub use activity_repo::ActivityRepo;
pub use workout_repo::WorkoutRepo;
