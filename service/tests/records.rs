//! Integration tests of reference data reads and submissions.

mod fake;

use axum::http::{Method, StatusCode};
use serde_json::json;
use service::{
    command::{
        create_season, CreateGame, CreateSeason, RecordOffense, UpdateOffense,
        UpdateSeason,
    },
    domain::{offense, season, user},
    infra::api,
    query::{self, users},
    Command as _, Query as _,
};

use self::fake::{FakeApi, Route, Service};

fn season_draft() -> CreateSeason {
    CreateSeason {
        name: season::Name::new("Apertura 2025").unwrap(),
        starts_on: "2025-03-01".parse().unwrap(),
    }
}

#[tokio::test]
async fn lists_seasons_newest_first() {
    let api = FakeApi::start(vec![Route::new(
        Method::GET,
        "/seasons",
        json!({"seasons": [
            {"id": 1, "name": "Apertura 2023", "date_ini": "2023-03-01"},
            {"id": 3, "name": "Apertura 2024", "date_ini": "2024-03-01T00:00:00.000Z"},
            {"id": 2, "name": "Clausura 2023", "date_ini": "2023-09-01"},
        ]}),
    )])
    .await;
    let service = Service::new(api.rest(), fake::storage(&[]).await);

    let seasons = service.execute(query::seasons::List).await.unwrap();

    let ids: Vec<_> = seasons.iter().map(|s| i64::from(s.id)).collect();
    assert_eq!(ids, [3, 2, 1]);
    assert_eq!(api.calls()[0].authorization, None);
}

#[tokio::test]
async fn reads_reference_data_with_session_token() {
    let api = FakeApi::start(vec![
        Route::new(Method::GET, "/seasons", json!({"seasons": []})),
        Route::new(Method::GET, "/games", json!({"games": []})),
    ])
    .await;
    let (service, _) = fake::logged_in(api.rest(), "tok.en.value").await;

    _ = service.execute(query::seasons::List).await.unwrap();
    _ = service
        .execute(query::games::BySeason(3.into()))
        .await
        .unwrap();

    let calls = api.calls();
    assert_eq!(calls.len(), 2);
    for call in calls {
        assert_eq!(
            call.authorization.as_deref(),
            Some("Bearer tok.en.value"),
            "{}",
            call.path,
        );
    }
}

#[tokio::test]
async fn lists_games_by_id_descending() {
    let api = FakeApi::start(vec![Route::new(
        Method::GET,
        "/games",
        json!({
            "message": "Games found",
            "count": 3,
            "season": {"name": "Apertura 2024", "date_ini": "2024-03-01"},
            "games": [
                {"id": 4, "id_season": 3, "win": true, "team_score": 5,
                 "opposing_team_name": "Tigres", "opposing_team_score": 2},
                {"id": 9, "id_season": 3, "win": false, "team_score": 0,
                 "opposing_team_name": "Leones", "opposing_team_score": 1},
                {"id": 6, "id_season": 3, "win": true, "team_score": 7,
                 "opposing_team_name": "Osos", "opposing_team_score": 6},
            ],
        }),
    )])
    .await;
    let service = Service::new(api.rest(), fake::storage(&[]).await);

    let list = service
        .execute(query::games::BySeason(3.into()))
        .await
        .unwrap();

    let ids: Vec<_> = list.games.iter().map(|g| i64::from(g.id)).collect();
    assert_eq!(ids, [9, 6, 4]);
    assert_eq!(AsRef::<str>::as_ref(&list.season.unwrap().name), "Apertura 2024");
    assert_eq!(api.calls()[0].query.as_deref(), Some("id_season=3"));
}

#[tokio::test]
async fn offense_with_zero_count_is_none() {
    let api = FakeApi::start(vec![Route::new(
        Method::GET,
        "/offensive-player-data",
        json!({"count": 0, "data": []}),
    )])
    .await;
    let service = Service::new(api.rest(), fake::storage(&[]).await);

    let record = service
        .execute(query::offense::ByPlayer::by(offense::Key {
            season_id: 3.into(),
            game_id: 9.into(),
            player_id: 7.into(),
        }))
        .await
        .unwrap();

    assert!(record.is_none());
    assert_eq!(
        api.calls()[0].query.as_deref(),
        Some("id_season=3&id_game=9&id_player=7"),
    );
}

#[tokio::test]
async fn offense_accepts_numeric_strings() {
    let api = FakeApi::start(vec![Route::new(
        Method::GET,
        "/offensive-player-data",
        json!({"count": "1", "data": [{
            "id": 5, "id_season": 3, "id_game": 9, "id_player": 7,
            "vb": "4", "hit": "2", "2b": 1, "3b": "0",
            "hr": "1", "bb": 0, "kk": "1",
        }]}),
    )])
    .await;
    let service = Service::new(api.rest(), fake::storage(&[]).await);

    let record = service
        .execute(query::offense::ByPlayer::by(offense::Key {
            season_id: 3.into(),
            game_id: 9.into(),
            player_id: 7.into(),
        }))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(i64::from(record.id), 5);
    assert_eq!(u32::from(record.line.at_bats), 4);
    assert_eq!(u32::from(record.line.hits), 2);
    assert_eq!(record.line.average(), Some(0.5));
}

#[tokio::test]
async fn season_stats_accept_sql_aggregates() {
    let api = FakeApi::start(vec![Route::new(
        Method::GET,
        "/offensive-stats-by-season/3",
        json!({"stats": [{
            "player_name": "ana",
            "tot_vb": "12", "tot_hits": "5", "tot_2b": "1", "tot_3b": "0",
            "tot_hr": "2", "tot_bb": "3", "tot_k": "4", "avg": "0.417",
        }]}),
    )])
    .await;
    let service = Service::new(api.rest(), fake::storage(&[]).await);

    let stats = service
        .execute(query::stats::BySeason::by(3.into()))
        .await
        .unwrap();

    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].player_name, "ana");
    assert_eq!(u32::from(stats[0].hits), 5);
    assert_eq!(stats[0].avg.unwrap().to_string(), "0.417");
}

#[tokio::test]
async fn season_stats_tolerate_missing_list() {
    let api = FakeApi::start(vec![Route::new(
        Method::GET,
        "/offensive-stats-by-season/4",
        json!({}),
    )])
    .await;
    let service = Service::new(api.rest(), fake::storage(&[]).await);

    let stats = service
        .execute(query::stats::BySeason::by(4.into()))
        .await
        .unwrap();

    assert!(stats.is_empty());
}

#[tokio::test]
async fn lists_players_in_both_shapes() {
    for body in [
        json!([{"id": 7, "username": "ana", "email": "a@x.com"}]),
        json!({"users": [{"id": 7, "username": "ana"}]}),
    ] {
        let api =
            FakeApi::start(vec![Route::new(Method::GET, "/users", body)])
                .await;
        let (service, _) = fake::logged_in(api.rest(), "h.p.s").await;

        let players = service.execute(users::List).await.unwrap();

        assert_eq!(players.len(), 1);
        assert_eq!(AsRef::<str>::as_ref(&players[0].username), "ana");
        assert_eq!(
            api.calls()[0].authorization.as_deref(),
            Some("Bearer h.p.s"),
        );
    }
}

#[tokio::test]
async fn listing_players_requires_session() {
    let api = FakeApi::start(vec![]).await;
    let service = Service::new(api.rest(), fake::storage(&[]).await);

    let err = service.execute(users::List).await.unwrap_err();

    assert!(matches!(err.as_ref(), users::ExecutionError::Unauthenticated));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn writes_require_session() {
    let api = FakeApi::start(vec![]).await;
    let service = Service::new(api.rest(), fake::storage(&[]).await);

    let err = service.execute(season_draft()).await.unwrap_err();

    assert!(matches!(
        err.as_ref(),
        create_season::ExecutionError::Unauthenticated,
    ));
    assert_eq!(err.as_ref().to_string(), "Authentication required");
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn creates_season_with_bearer_token() {
    let api = FakeApi::start(vec![Route::new(
        Method::POST,
        "/seasons",
        json!({"id": 4, "name": "Apertura 2025", "date_ini": "2025-03-01"}),
    )
    .status(StatusCode::CREATED)])
    .await;
    let (service, _) = fake::logged_in(api.rest(), "h.p.s").await;

    service.execute(season_draft()).await.unwrap();

    let call = &api.calls()[0];
    assert_eq!(call.method, Method::POST);
    assert_eq!(call.authorization.as_deref(), Some("Bearer h.p.s"));
    assert_eq!(
        call.body,
        json!({"name": "Apertura 2025", "date_ini": "2025-03-01"}),
    );
}

#[tokio::test]
async fn updates_season_by_id() {
    let api = FakeApi::start(vec![Route::new(
        Method::PUT,
        "/seasons/4",
        json!({"message": "updated"}),
    )])
    .await;
    let (service, _) = fake::logged_in(api.rest(), "h.p.s").await;

    let season = service
        .execute(UpdateSeason {
            id: 4.into(),
            name: season::Name::new("Apertura 2025 (B)").unwrap(),
            starts_on: "2025-03-08".parse().unwrap(),
        })
        .await
        .unwrap();

    assert_eq!(season.starts_on.to_string(), "2025-03-08");
    assert_eq!(
        api.calls()[0].body,
        json!({"name": "Apertura 2025 (B)", "date_ini": "2025-03-08"}),
    );
}

#[tokio::test]
async fn reports_season_rejection_message() {
    let api = FakeApi::start(vec![Route::new(
        Method::POST,
        "/seasons",
        json!({"message": "Season already exists"}),
    )
    .status(StatusCode::CONFLICT)])
    .await;
    let (service, _) = fake::logged_in(api.rest(), "h.p.s").await;

    let err = service.execute(season_draft()).await.unwrap_err();

    let create_season::ExecutionError::Api(api::Error::Rejected(rejection)) =
        err.as_ref()
    else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(rejection.status, StatusCode::CONFLICT);
    assert_eq!(rejection.to_string(), "Season already exists");
}

#[tokio::test]
async fn creates_game_without_outcome() {
    let api = FakeApi::start(vec![Route::new(
        Method::POST,
        "/games",
        json!({"message": "created"}),
    )])
    .await;
    let (service, _) = fake::logged_in(api.rest(), "h.p.s").await;

    service
        .execute(CreateGame {
            season: 3.into(),
            opponent: "Tigres".parse().unwrap(),
            team_score: 5.into(),
            opponent_score: 2.into(),
        })
        .await
        .unwrap();

    assert_eq!(
        api.calls()[0].body,
        json!({
            "id_season": 3,
            "team_score": 5,
            "opposing_team_name": "Tigres",
            "opposing_team_score": 2,
        }),
    );
}

#[tokio::test]
async fn records_offense_for_logged_in_player() {
    let api = FakeApi::start(vec![Route::new(
        Method::POST,
        "/offensive-player-data",
        json!({"message": "created"}),
    )])
    .await;
    let (service, _) = fake::logged_in(api.rest(), "h.p.s").await;

    service
        .execute(RecordOffense {
            season: 3.into(),
            game: 9.into(),
            line: offense::Line {
                at_bats: 4.into(),
                hits: 2.into(),
                doubles: 1.into(),
                ..offense::Line::default()
            },
        })
        .await
        .unwrap();

    assert_eq!(
        api.calls()[0].body,
        json!({
            "id_season": 3, "id_game": 9, "id_player": 7,
            "vb": 4, "hit": 2, "2b": 1, "3b": 0,
            "hr": 0, "bb": 0, "kk": 0,
        }),
    );
}

#[tokio::test]
async fn updates_offense_by_id() {
    let api = FakeApi::start(vec![Route::new(
        Method::PUT,
        "/offensive-player-data/5",
        json!({"message": "updated"}),
    )])
    .await;
    let (service, _) = fake::logged_in(api.rest(), "h.p.s").await;

    let record = service
        .execute(UpdateOffense {
            id: 5.into(),
            season: 3.into(),
            game: 9.into(),
            line: offense::Line {
                walks: 2.into(),
                ..offense::Line::default()
            },
        })
        .await
        .unwrap();

    assert_eq!(record.player_id, user::Id::from(7));
    assert_eq!(api.calls()[0].body["id_player"], 7);
    assert_eq!(api.calls()[0].body["bb"], 2);
}
