// Unit tests for DomainError -> AppError mapping; no HTTP server or database involved.
use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn maps_validation_to_400() {
    let de = DomainError::validation(ValidationKind::InvalidRanking, "ranking mismatch");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::InvalidRanking);
    assert_eq!(app.status().as_u16(), 400);

    let de = DomainError::validation(ValidationKind::InvalidGameId, "bad id");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::InvalidGameId);
    assert_eq!(app.status().as_u16(), 400);
}

#[test]
fn maps_lifecycle_conflicts_to_409() {
    for (kind, code) in [
        (ConflictKind::AlreadyJoined, "ALREADY_JOINED"),
        (ConflictKind::GameClosed, "GAME_CLOSED"),
        (ConflictKind::NotReady, "NOT_READY"),
        (ConflictKind::AlreadyStarted, "ALREADY_STARTED"),
        (ConflictKind::AlreadyFinished, "ALREADY_FINISHED"),
        (ConflictKind::InvalidState, "INVALID_STATE"),
        (ConflictKind::LostRace, "CONFLICT"),
    ] {
        let app: AppError = DomainError::conflict(kind, "x").into();
        assert_eq!(app.code().as_str(), code);
        assert_eq!(app.status().as_u16(), 409);
    }
}

#[test]
fn maps_not_found() {
    let app: AppError = DomainError::not_found(NotFoundKind::Game, "Game 7 not found").into();
    assert_eq!(app.code(), ErrorCode::GameNotFound);
    assert_eq!(app.status().as_u16(), 404);
    assert_eq!(app.detail(), "Game 7 not found");

    let app: AppError = DomainError::not_found(NotFoundKind::Player, "nope").into();
    assert_eq!(app.code(), ErrorCode::PlayerNotFound);
}

#[test]
fn maps_identity_failures() {
    let app: AppError = DomainError::unauthenticated("unknown player").into();
    assert_eq!(app.code(), ErrorCode::Unauthenticated);
    assert_eq!(app.status().as_u16(), 401);

    let app: AppError = DomainError::forbidden("not a participant").into();
    assert_eq!(app.code(), ErrorCode::Forbidden);
    assert_eq!(app.status().as_u16(), 403);
}

#[test]
fn maps_infra_to_503_except_corruption() {
    let app: AppError = DomainError::infra(InfraErrorKind::Timeout, "slow").into();
    assert_eq!(app.code(), ErrorCode::StorageUnavailable);
    assert_eq!(app.status().as_u16(), 503);

    let app: AppError = DomainError::infra(InfraErrorKind::DbUnavailable, "down").into();
    assert_eq!(app.status().as_u16(), 503);

    let app: AppError = DomainError::infra(InfraErrorKind::DataCorruption, "missing row").into();
    assert_eq!(app.code(), ErrorCode::DataCorruption);
    assert_eq!(app.status().as_u16(), 500);
}

#[test]
fn only_retryable_infra_errors_become_503() {
    for kind in [
        InfraErrorKind::Timeout,
        InfraErrorKind::DbUnavailable,
        InfraErrorKind::DataCorruption,
        InfraErrorKind::Other("DbErr".into()),
    ] {
        let err = DomainError::infra(kind, "x");
        let retryable = err.is_retryable();
        let app: AppError = err.into();
        assert_eq!(app.status().as_u16() == 503, retryable);
    }
}
