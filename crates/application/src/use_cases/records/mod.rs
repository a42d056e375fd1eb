mod resolve_all;

pub use resolve_all::ResolveAllRecordsUseCase;
