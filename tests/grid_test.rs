mod common;

use anyhow::Result;
use common::{parse_date, test_service};
use hucha::application::AppError;
use hucha::domain::{MovementDraft, MovementKind};
use hucha::io::{parse_grid, GridExporter};

#[tokio::test]
async fn test_grid_export_parse_roundtrip() -> Result<()> {
    let (service, _temp) = test_service().await?;

    service
        .add_movement(
            "ana",
            parse_date("2024-01-05"),
            "food",
            Some("market".into()),
            2550,
            MovementKind::Expense,
        )
        .await?;
    service
        .add_movement(
            "ana",
            parse_date("2024-01-10"),
            "salary",
            None,
            150000,
            MovementKind::Income,
        )
        .await?;

    let mut buffer = Vec::new();
    let exported = GridExporter::new(&service)
        .export_movements_csv("ana", &mut buffer)
        .await?;
    assert_eq!(exported, 2);

    let drafts = parse_grid(buffer.as_slice())?;
    assert_eq!(drafts.len(), 2);
    assert!(drafts.iter().all(|d| d.id.is_some()));
    assert_eq!(drafts[0].amount_cents, 2550);
    assert_eq!(drafts[0].concept, Some("market".to_string()));
    assert_eq!(drafts[1].kind, MovementKind::Income);

    Ok(())
}

#[tokio::test]
async fn test_grid_apply_upserts() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let existing = service
        .add_movement(
            "ana",
            parse_date("2024-01-05"),
            "food",
            None,
            2000,
            MovementKind::Expense,
        )
        .await?;

    let drafts = vec![
        // Edited copy of the existing row
        MovementDraft {
            id: Some(existing.id),
            date: parse_date("2024-01-06"),
            category: "leisure".into(),
            concept: Some("corrected".into()),
            amount_cents: 2200,
            kind: MovementKind::Expense,
        },
        // Fresh row typed straight into the grid
        MovementDraft {
            id: None,
            date: parse_date("2024-01-07"),
            category: "salary".into(),
            concept: None,
            amount_cents: 90000,
            kind: MovementKind::Income,
        },
    ];

    let outcome = service.reconcile_movements("ana", drafts).await?;
    assert_eq!(outcome.updated, 1);
    assert_eq!(outcome.inserted, 1);

    let movements = service.list_movements("ana").await?;
    assert_eq!(movements.len(), 2);

    let edited = movements.iter().find(|m| m.id == existing.id).unwrap();
    assert_eq!(edited.amount_cents, 2200);
    assert_eq!(edited.category, "leisure");
    assert_eq!(edited.date, parse_date("2024-01-06"));

    Ok(())
}

#[tokio::test]
async fn test_grid_apply_rejects_foreign_rows_before_writing() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let ana_row = service
        .add_movement(
            "ana",
            parse_date("2024-01-05"),
            "food",
            None,
            2000,
            MovementKind::Expense,
        )
        .await?;

    // Bruno's batch: one fresh row plus an attempt to edit ana's row
    let drafts = vec![
        MovementDraft {
            id: None,
            date: parse_date("2024-01-06"),
            category: "transport".into(),
            concept: None,
            amount_cents: 700,
            kind: MovementKind::Expense,
        },
        MovementDraft {
            id: Some(ana_row.id),
            date: parse_date("2024-01-06"),
            category: "food".into(),
            concept: None,
            amount_cents: 1,
            kind: MovementKind::Expense,
        },
    ];

    let result = service.reconcile_movements("bruno", drafts).await;
    assert!(matches!(result, Err(AppError::MovementNotFound(_))));

    // The batch was rejected before any write: no new row for bruno,
    // ana's row untouched
    assert!(service.list_movements("bruno").await?.is_empty());
    let ana_rows = service.list_movements("ana").await?;
    assert_eq!(ana_rows[0].amount_cents, 2000);

    Ok(())
}

#[tokio::test]
async fn test_grid_apply_validates_whole_batch_first() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let drafts = vec![
        MovementDraft {
            id: None,
            date: parse_date("2024-01-06"),
            category: "food".into(),
            concept: None,
            amount_cents: 700,
            kind: MovementKind::Expense,
        },
        MovementDraft {
            id: None,
            date: parse_date("2024-01-07"),
            category: "food".into(),
            concept: None,
            amount_cents: -5,
            kind: MovementKind::Expense,
        },
    ];

    let result = service.reconcile_movements("ana", drafts).await;
    assert!(matches!(result, Err(AppError::InvalidAmount(-5))));
    assert!(service.list_movements("ana").await?.is_empty());

    Ok(())
}
