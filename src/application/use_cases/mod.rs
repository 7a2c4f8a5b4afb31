/// Use cases module containing application business logic orchestration
mod await_completion;
mod submit_bom;
mod upload_bom;

#[cfg(test)]
mod test_doubles;

pub use await_completion::CompletionWatcher;
pub use submit_bom::SubmitBomUseCase;
pub use upload_bom::UploadBomUseCase;
