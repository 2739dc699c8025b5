mod common;

use anyhow::Result;
use common::{parse_date, test_service};
use hucha::domain::MovementKind;

#[tokio::test]
async fn test_dashboard_totals_and_health_score() -> Result<()> {
    let (service, _temp) = test_service().await?;

    // income 1000, expense 800 => savings rate 0.2 => score 30
    service
        .add_movement(
            "ana",
            parse_date("2024-01-01"),
            "salary",
            None,
            100000,
            MovementKind::Income,
        )
        .await?;
    service
        .add_movement(
            "ana",
            parse_date("2024-01-02"),
            "home",
            Some("rent".into()),
            80000,
            MovementKind::Expense,
        )
        .await?;

    let dashboard = service.dashboard("ana").await?;
    assert_eq!(dashboard.totals.income, 100000);
    assert_eq!(dashboard.totals.expense, 80000);
    assert_eq!(dashboard.totals.investment, 0);
    assert_eq!(dashboard.balance, 20000);
    assert_eq!(dashboard.health_score, 30);

    Ok(())
}

#[tokio::test]
async fn test_dashboard_breakdown_and_daily_intensity() -> Result<()> {
    let (service, _temp) = test_service().await?;

    service
        .add_movement(
            "ana",
            parse_date("2024-01-05"),
            "food",
            None,
            1500,
            MovementKind::Expense,
        )
        .await?;
    service
        .add_movement(
            "ana",
            parse_date("2024-01-05"),
            "leisure",
            None,
            3000,
            MovementKind::Expense,
        )
        .await?;
    service
        .add_movement(
            "ana",
            parse_date("2024-01-08"),
            "food",
            None,
            500,
            MovementKind::Expense,
        )
        .await?;
    // Income never shows up in expense views
    service
        .add_movement(
            "ana",
            parse_date("2024-01-05"),
            "salary",
            None,
            100000,
            MovementKind::Income,
        )
        .await?;

    let dashboard = service.dashboard("ana").await?;

    assert_eq!(dashboard.expense_breakdown.len(), 2);
    assert_eq!(dashboard.expense_breakdown.get("food"), Some(&2000));
    assert_eq!(dashboard.expense_breakdown.get("leisure"), Some(&3000));

    assert_eq!(dashboard.daily_expense.len(), 2);
    assert_eq!(
        dashboard.daily_expense.get(&parse_date("2024-01-05")),
        Some(&4500)
    );
    assert_eq!(
        dashboard.daily_expense.get(&parse_date("2024-01-08")),
        Some(&500)
    );

    Ok(())
}

#[tokio::test]
async fn test_dashboard_includes_goal_progress() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let goal = service.add_goal("ana", "Holiday fund", 20000).await?;
    service.deposit(goal.id, 5000).await?;

    let dashboard = service.dashboard("ana").await?;
    assert_eq!(dashboard.goals.len(), 1);

    let progress = &dashboard.goals[0];
    assert_eq!(progress.goal.current_cents, 5000);
    assert!((progress.ratio - 0.25).abs() < f64::EPSILON);
    assert!(!progress.complete);

    Ok(())
}

#[tokio::test]
async fn test_dashboard_recomputes_on_every_read() -> Result<()> {
    let (service, _temp) = test_service().await?;

    service
        .add_movement(
            "ana",
            parse_date("2024-01-01"),
            "salary",
            None,
            100000,
            MovementKind::Income,
        )
        .await?;

    let before = service.dashboard("ana").await?;
    assert_eq!(before.balance, 100000);
    assert_eq!(before.health_score, 100);

    service
        .add_movement(
            "ana",
            parse_date("2024-01-02"),
            "food",
            None,
            40000,
            MovementKind::Expense,
        )
        .await?;

    let after = service.dashboard("ana").await?;
    assert_eq!(after.balance, 60000);
    assert_eq!(after.totals.expense, 40000);

    Ok(())
}

#[tokio::test]
async fn test_dashboard_is_empty_for_fresh_user() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let dashboard = service.dashboard("bruno").await?;
    assert_eq!(dashboard.balance, 0);
    assert_eq!(dashboard.health_score, 0);
    assert!(dashboard.expense_breakdown.is_empty());
    assert!(dashboard.goals.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_category_profit_for_shared_label() -> Result<()> {
    let (service, _temp) = test_service().await?;

    // "bar" is a side business: income and expense share the label
    service
        .add_movement(
            "ana",
            parse_date("2024-01-10"),
            "bar",
            Some("takings".into()),
            60000,
            MovementKind::Income,
        )
        .await?;
    service
        .add_movement(
            "ana",
            parse_date("2024-01-11"),
            "bar",
            Some("supplies".into()),
            22000,
            MovementKind::Expense,
        )
        .await?;
    service
        .add_movement(
            "ana",
            parse_date("2024-01-12"),
            "food",
            None,
            4000,
            MovementKind::Expense,
        )
        .await?;

    assert_eq!(service.category_profit("ana", "bar").await?, 38000);
    assert_eq!(service.category_profit("ana", "food").await?, -4000);

    Ok(())
}
