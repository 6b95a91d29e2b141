use roadside::error::{AppError, DecodeError, GeometryError, ProviderError, ProviderErrorKind};
use roadside::models::{BucketKind, Coordinates, Mood, MoodTable, ThingsToDoRequest};
use roadside::services::ComputedRoute;
use std::collections::HashSet;
use std::sync::Arc;
use tokio_test::{assert_err, assert_ok};

mod common;
use common::*;

fn request() -> ThingsToDoRequest {
    ThingsToDoRequest::new(
        Coordinates { lat: 0.0, lng: 0.0 },
        Coordinates { lat: 0.0, lng: 1.0 },
    )
}

fn near(a: &Coordinates, lng: f64) -> bool {
    a.approx_eq(&Coordinates { lat: 0.0, lng }, 1e-6)
}

#[tokio::test]
async fn test_end_to_end_ranking_and_dedup() {
    let routing = Arc::new(StaticRouting::new(equator_route(Some(3600))));
    let places = Arc::new(ScriptedPlaces::by_bucket(
        vec![poi("road", 4.0, 10), poi("shared", 4.8, 300)],
        vec![poi("shared", 4.8, 300), poi("dest", 4.5, 50)],
    ));
    let pipeline = test_pipeline(routing, places.clone());

    let mut req = request();
    req.mood = " FOOD ".to_string();
    let result = assert_ok!(pipeline.run(&req).await);

    assert_eq!(result.mood, Mood::Food);
    assert_eq!(ids(&result.near_destination), vec!["shared", "dest"]);
    assert_eq!(ids(&result.en_route), vec!["road"]);
    assert_eq!(result.counts.en_route, 1);
    assert_eq!(result.counts.near_destination, 2);

    // Two anchors per bucket
    let searches = places.searches.lock().unwrap();
    assert_eq!(searches.len(), 4);
    assert!(searches
        .iter()
        .all(|s| s.categories == vec!["restaurant", "cafe", "bakery"] && s.max_results == 15));

    assert_eq!(result.buckets.len(), 2);
    let en_route = &result.buckets[0];
    assert_eq!(en_route.label, BucketKind::EnRoute);
    assert!(near(&en_route.anchors[0], 0.75));
    assert!(near(&en_route.anchors[1], 1.0));
    let near_destination = &result.buckets[1];
    assert!(near(&near_destination.anchors[0], 0.5));
    assert!(near(&near_destination.anchors[1], 2.0 / 3.0));

    assert_eq!(result.route.distance_meters, 111_195);
    assert_eq!(result.route.duration_seconds, Some(3600));
    assert!((result.route.path_length_meters - 111_195.0).abs() < 100.0);
    let preview = &result.route.preview;
    assert!(near(&preview[0], 0.0));
    assert!(near(&preview[preview.len() - 1], 1.0));
}

#[tokio::test]
async fn test_lists_never_share_ids() {
    let shared: Vec<_> = (0..20).map(|i| poi(&format!("s{i}"), 4.0 + (i % 5) as f64 / 10.0, i * 7)).collect();
    let mut en_route = shared.clone();
    en_route.push(poi("road-only", 5.0, 5_000));
    let places = Arc::new(ScriptedPlaces::by_bucket(en_route, shared));
    let pipeline = test_pipeline(Arc::new(StaticRouting::new(equator_route(Some(7200)))), places);

    let mut req = request();
    req.limit = 8;
    let result = pipeline.run(&req).await.unwrap();

    let near_ids: HashSet<&str> = ids(&result.near_destination).into_iter().collect();
    assert_eq!(result.near_destination.len(), 8);
    assert!(ids(&result.en_route).iter().all(|id| !near_ids.contains(id)));
    assert_eq!(result.en_route[0].id, "road-only");
    assert!(result.en_route.len() <= 8);
}

#[tokio::test]
async fn test_unknown_mood_falls_back_to_scenic() {
    let places = Arc::new(ScriptedPlaces::empty());
    let pipeline = test_pipeline(Arc::new(StaticRouting::new(equator_route(Some(3600)))), places.clone());

    let mut req = request();
    req.mood = "zzz".to_string();
    let result = pipeline.run(&req).await.unwrap();

    assert_eq!(result.mood, Mood::Scenic);
    let expected = MoodTable::default().categories_for(Mood::Scenic, 3);
    assert!(places
        .searches
        .lock()
        .unwrap()
        .iter()
        .all(|s| s.categories == expected));
}

#[tokio::test]
async fn test_zero_duration_uses_distance_fractions() {
    for duration in [None, Some(0)] {
        let pipeline = test_pipeline(
            Arc::new(StaticRouting::new(equator_route(duration))),
            Arc::new(ScriptedPlaces::empty()),
        );
        let result = pipeline.run(&request()).await.unwrap();

        let anchors: Vec<[Coordinates; 2]> = result.buckets.iter().map(|b| b.anchors).collect();
        assert!(near(&anchors[0][0], 0.40), "{duration:?}");
        assert!(near(&anchors[0][1], 0.50), "{duration:?}");
        assert!(near(&anchors[1][0], 0.85), "{duration:?}");
        assert!(near(&anchors[1][1], 0.92), "{duration:?}");
    }
}

#[tokio::test]
async fn test_malformed_polyline_is_decode_error() {
    let routing = Arc::new(StaticRouting::new(ComputedRoute {
        encoded_path: "_p~iF~ps|U_ulLnnqC_mqNvxq".to_string(),
        distance_meters: 1_000,
        duration_seconds: Some(60),
    }));
    let places = Arc::new(ScriptedPlaces::empty());
    let pipeline = test_pipeline(routing, places.clone());

    let err = assert_err!(pipeline.run(&request()).await);
    assert!(matches!(
        err,
        AppError::Decode(DecodeError::Truncated { position: 25 })
    ));
    assert!(places.searches.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_single_point_route_is_geometry_error() {
    let routing = Arc::new(StaticRouting::new(ComputedRoute {
        encoded_path: encode_polyline(&[Coordinates { lat: 0.0, lng: 0.0 }]),
        distance_meters: 0,
        duration_seconds: Some(0),
    }));
    let pipeline = test_pipeline(routing, Arc::new(ScriptedPlaces::empty()));

    let err = pipeline.run(&request()).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Geometry(GeometryError::TooFewPoints { count: 1 })
    ));
}

#[tokio::test]
async fn test_zero_length_route_collapses_anchors() {
    let here = Coordinates { lat: 10.0, lng: 10.0 };
    let routing = Arc::new(StaticRouting::new(ComputedRoute {
        encoded_path: encode_polyline(&[here, here]),
        distance_meters: 0,
        duration_seconds: Some(30),
    }));
    let pipeline = test_pipeline(routing, Arc::new(ScriptedPlaces::empty()));

    let result = pipeline.run(&request()).await.unwrap();
    assert!(result
        .buckets
        .iter()
        .flat_map(|b| b.anchors)
        .all(|a| a.approx_eq(&here, 1e-9)));
}

#[tokio::test]
async fn test_routing_failure_aborts_before_searching() {
    let routing = Arc::new(StaticRouting::failing(ProviderError::upstream(
        "routing",
        "HTTP 403: forbidden",
    )));
    let places = Arc::new(ScriptedPlaces::empty());
    let pipeline = test_pipeline(routing, places.clone());

    match pipeline.run(&request()).await {
        Err(AppError::Provider(e)) => assert_eq!(e.kind, ProviderErrorKind::Upstream),
        other => panic!("expected provider error, got {other:?}"),
    }
    assert!(places.searches.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_one_failed_search_fails_the_request() {
    let places = Arc::new(ScriptedPlaces::new(|search| {
        if search.radius_meters == NEAR_DESTINATION_RADIUS {
            Err(ProviderError::bad_response("places", "unexpected body"))
        } else {
            Ok(vec![poi("road", 4.0, 10)])
        }
    }));
    let pipeline = test_pipeline(Arc::new(StaticRouting::new(equator_route(Some(3600)))), places);

    match pipeline.run(&request()).await {
        Err(AppError::Provider(e)) => assert_eq!(e.kind, ProviderErrorKind::BadResponse),
        other => panic!("expected provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_no_places_is_not_an_error() {
    let pipeline = test_pipeline(
        Arc::new(StaticRouting::new(equator_route(Some(3600)))),
        Arc::new(ScriptedPlaces::empty()),
    );

    let result = pipeline.run(&request()).await.unwrap();
    assert!(result.en_route.is_empty());
    assert!(result.near_destination.is_empty());
    assert_eq!(result.counts.en_route, 0);
    assert_eq!(result.counts.near_destination, 0);
}

#[tokio::test]
async fn test_limit_is_clamped_not_rejected() {
    let many: Vec<_> = (0..40).map(|i| poi(&format!("p{i}"), 4.0, i)).collect();
    let pipeline = test_pipeline(
        Arc::new(StaticRouting::new(equator_route(Some(3600)))),
        Arc::new(ScriptedPlaces::by_bucket(Vec::new(), many)),
    );

    let mut req = request();
    req.limit = 1_000;
    let result = pipeline.run(&req).await.unwrap();
    assert_eq!(result.near_destination.len(), 30);
    assert_eq!(result.near_destination[0].id, "p39");

    req.limit = 0;
    let result = pipeline.run(&req).await.unwrap();
    assert_eq!(ids(&result.near_destination), vec!["p39"]);
}

#[tokio::test]
async fn test_via_points_reach_the_router() {
    let routing = Arc::new(StaticRouting::new(equator_route(Some(3600))));
    let pipeline = test_pipeline(routing.clone(), Arc::new(ScriptedPlaces::empty()));

    let mut req = request();
    req.via = vec![Coordinates { lat: 0.1, lng: 0.3 }];
    pipeline.run(&req).await.unwrap();

    let calls = routing.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].2, vec![Coordinates { lat: 0.1, lng: 0.3 }]);
}
