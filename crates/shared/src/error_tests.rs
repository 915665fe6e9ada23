use rstest::rstest;

use super::*;

#[rstest]
#[case::not_found(AppError::NotFound("plan gold".into()), 404, "NOT_FOUND", "Not found: plan gold")]
#[case::external(
    AppError::ExternalService("store down".into()),
    500,
    "EXTERNAL_SERVICE_ERROR",
    "External service error: store down"
)]
#[case::internal(
    AppError::Internal("bad catalog".into()),
    500,
    "INTERNAL_ERROR",
    "Internal error: bad catalog"
)]
fn test_app_error_mapping(
    #[case] error: AppError,
    #[case] status: u16,
    #[case] code: &str,
    #[case] message: &str,
) {
    assert_eq!(error.status_code(), status);
    assert_eq!(error.error_code(), code);
    assert_eq!(error.to_string(), message);
}

#[test]
fn test_app_result_propagates() {
    fn lookup(found: bool) -> AppResult<u32> {
        if found {
            Ok(7)
        } else {
            Err(AppError::NotFound("plan".into()))
        }
    }

    assert_eq!(lookup(true).ok(), Some(7));
    assert!(matches!(lookup(false), Err(AppError::NotFound(_))));
}
