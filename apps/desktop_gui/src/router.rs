/// Pages the shell can show. Only the root path has a page behind it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    CandidateForm,
    NotFound(String),
}

impl Route {
    pub fn resolve(path: &str) -> Self {
        match path.trim() {
            "" | "/" => Route::CandidateForm,
            other => Route::NotFound(other.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Route::CandidateForm => "/",
            Route::NotFound(path) => path,
        }
    }
}
