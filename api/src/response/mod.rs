use serde::Serialize;

/// Standard JSON envelope for every endpoint:
///
/// ```json
/// { "success": true, "data": { ... }, "message": "..." }
/// ```
///
/// Error responses carry `success: false` and `T::default()` as data, so the
/// frontend can always destructure the same shape.
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
        }
    }
}
