/// API fetch state enum
#[derive(Clone, PartialEq, Debug)]
pub enum FetchState<T> {
    NotStarted,
    Loading,
    Success(T),
    Error(String),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::NotStarted
    }
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&String> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for FetchState<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::Success(data),
            Err(err) => Self::Error(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compute::ApiError;

    #[test]
    fn test_state_from_result() {
        let state: FetchState<u32> = Ok::<u32, ApiError>(3).into();
        assert_eq!(state.data(), Some(&3));
        assert!(!state.is_loading());

        let state: FetchState<u32> = Err::<u32, _>(ApiError::Status(500)).into();
        assert_eq!(state.error().map(String::as_str), Some("HTTP error: 500"));
        assert_eq!(state.data(), None);
    }
}
