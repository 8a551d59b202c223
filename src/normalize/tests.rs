use super::*;
use crate::cli::types::Platform;
use crate::rank::Tier;
use serde_json::json;

fn payload(source: &'static str, body: Value) -> RawPayload {
    RawPayload::new(source, "MacieJay", Platform::Pc, body)
}

fn r6scn_body() -> Value {
    json!({
        "username": "MacieJay",
        "Basicstat": [
            {"region": "apac", "level": "152", "mmr": 3000, "platform": "uplay"},
            {"region": "emea", "level": 98, "mmr": 2100, "platform": "uplay"}
        ],
        "StatGeneral": [{
            "kills": 10,
            "deaths": 0,
            "killAssists": 4,
            "headshot": 5,
            "bulletsFired": 200,
            "bulletsHit": 50,
            "timePlayed": "3600",
            "played": 5,
            "won": 5,
            "lost": 0
        }],
        "StatCR": [
            {"model": "casual", "kills": 30, "deaths": 15, "won": 6, "lost": 4, "played": 10},
            {"model": "ranked", "kills": 40, "deaths": 20, "won": 7, "lost": 3, "played": 10, "mmr": 1234}
        ],
        "StatCR2": [
            {"model": "ranked", "kills": 8, "deaths": 4, "won": 1, "lost": 0, "mmr": 4500,
             "update_at": {"time": 1_600_000_000_000u64}}
        ],
        "StatOperator": [
            {"name": "ash", "kills": 50, "deaths": 20, "won": 10, "lost": 5, "timePlayed": 7200},
            {"name": "thermite", "kills": "1,200", "deaths": 400, "won": 80, "lost": 40, "timePlayed": 90000},
            {"name": "sledge", "kills": 1, "deaths": 1, "won": 0, "lost": 1}
        ],
        "SeasonRanks": [
            {"season": 5, "mmr": 3000, "max_mmr": 3100, "wins": 10, "losses": 8},
            {"season": 5, "mmr": 4500, "max_mmr": 4600, "wins": 20, "losses": 2},
            {"season": 4, "mmr": 2600, "max_mmr": 2700}
        ],
        "Casualstat": {"user_id": "4f9c-profile", "mmr": 2500}
    })
}

mod r6scn_tests {
    use super::*;

    #[test]
    fn test_general_stats_with_zero_deaths() {
        let stats = normalize(R6SCN, &payload(R6SCN, r6scn_body())).unwrap();

        let general = stats.general().unwrap();
        assert_eq!(general.kd().to_string(), "∞");
        assert_eq!(general.win_rate().to_string(), "100.00%");
        assert_eq!(general.time_played, Some(3600));
        assert_eq!(general.assists, Some(4));
        assert_eq!(general.accuracy().to_string(), "25.00%");
    }

    #[test]
    fn test_identity_and_profile() {
        let stats = normalize(R6SCN, &payload(R6SCN, r6scn_body())).unwrap();

        assert_eq!(stats.identity().username(), "MacieJay");
        assert_eq!(
            stats.identity().profile_id().map(|id| id.as_str()),
            Some("4f9c-profile")
        );
        assert_eq!(stats.level(), Some(152));
        assert_eq!(stats.profile().unwrap().regions.len(), 2);
    }

    #[test]
    fn test_mmr_comes_from_configured_pointers() {
        let stats = normalize(R6SCN, &payload(R6SCN, r6scn_body())).unwrap();

        // Basicstat[0].mmr replaces the StatCR value.
        let ranked = stats.ranked().unwrap();
        assert_eq!(ranked.mmr, Some(3000.0));
        assert_eq!(ranked.tier.unwrap().to_string(), "Gold I");
        assert_eq!(ranked.kd().to_string(), "2.00");

        let casual = stats.casual().unwrap();
        assert_eq!(casual.mmr, Some(2500.0));
        assert_eq!(casual.tier.unwrap().tier, Tier::Silver);
        assert_eq!(casual.win_rate().to_string(), "60.00%");
    }

    #[test]
    fn test_recent_matches_are_tiered_and_timestamped() {
        let stats = normalize(R6SCN, &payload(R6SCN, r6scn_body())).unwrap();

        let recent = stats.recent();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].tier.unwrap().tier, Tier::Diamond);
        assert_eq!(
            recent[0].updated_at.map(|t| t.timestamp()),
            Some(1_600_000_000)
        );
    }

    #[test]
    fn test_operators_accept_display_numbers() {
        let stats = normalize(R6SCN, &payload(R6SCN, r6scn_body())).unwrap();

        let top: Vec<&str> = stats
            .top_operators(2)
            .iter()
            .map(|op| op.name.as_str())
            .collect();
        assert_eq!(top, vec!["thermite", "ash"]);
        assert_eq!(stats.operators()[1].kills, 1200);
    }

    #[test]
    fn test_seasons_deduplicated_with_peak_from_raw_feed() {
        let stats = normalize(R6SCN, &payload(R6SCN, r6scn_body())).unwrap();

        let seasons = stats.seasons();
        assert_eq!(seasons.len(), 2);
        let season5 = seasons.iter().find(|s| s.season == 5).unwrap();
        assert_eq!(season5.mmr, Some(3000.0));

        let peak = stats.historical_peak().unwrap();
        assert_eq!(peak.season, 5);
        assert_eq!(peak.max_mmr, Some(4600.0));
        assert_eq!(peak.peak_tier.unwrap().to_string(), "Diamond II");
    }

    #[test]
    fn test_empty_general_block_is_malformed() {
        let mut body = r6scn_body();
        body["StatGeneral"] = json!([]);

        let err = normalize(R6SCN, &payload(R6SCN, body)).unwrap_err();
        assert!(matches!(err, R6sError::MalformedResponse { .. }));
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        let err = normalize(R6SCN, &payload(R6SCN, json!({"StatGeneral": "nope"}))).unwrap_err();
        match err {
            R6sError::MalformedResponse { source_name, .. } => assert_eq!(source_name, "r6scn"),
            other => panic!("Expected MalformedResponse, got {other:?}"),
        }
    }
}

mod tracker_tests {
    use super::*;

    #[test]
    fn test_tracker_blocks() {
        let body = json!({
            "userMainData": {
                "nickname": "MacieJay",
                "profileId": "abc-123",
                "level": "201",
                "region": "emea",
                "stats": {"kills": "1,000", "deaths": 500, "wins": 60, "losses": 40, "matches": 100},
                "ranked": {"kills": 300, "deaths": 300, "wins": 20, "losses": 20, "matches": 40, "mmr": "2,850"}
            },
            "userSeasonsData": [
                {"season": 20, "mmr": 2850, "maxMmr": 3010},
                {"season": 19, "mmr": 2500, "maxMmr": 2600}
            ]
        });

        let stats = normalize(R6TRACKER, &payload(R6TRACKER, body)).unwrap();
        assert_eq!(stats.level(), Some(201));
        assert_eq!(stats.general().unwrap().kd().to_string(), "2.00");
        assert_eq!(stats.general().unwrap().win_rate().to_string(), "60.00%");

        let ranked = stats.ranked().unwrap();
        assert_eq!(ranked.mmr, Some(2850.0));
        assert_eq!(ranked.tier.unwrap().to_string(), "Gold II");
        assert!(stats.casual().is_none());
        assert_eq!(stats.historical_peak().unwrap().season, 20);
    }

    #[test]
    fn test_tracker_without_main_block_is_malformed() {
        let err = normalize(R6TRACKER, &payload(R6TRACKER, json!({}))).unwrap_err();
        assert!(matches!(err, R6sError::MalformedResponse { .. }));
    }
}

mod statsdb_tests {
    use super::*;

    #[test]
    fn test_statsdb_uses_steel_wave_table() {
        let body = json!({
            "payload": {
                "user": {"nickname": "MacieJay", "id": "db-id"},
                "stats": {
                    "progression": {"level": "88"},
                    "general": {"kills": 90, "deaths": 30, "wins": 3, "losses": 1, "matches": 4},
                    "seasonal": {
                        "ranked": {"kills": 10, "deaths": 5, "mmr": 2850},
                        "casual": {"mmr": 2000}
                    },
                    "operators": [{"id": "jager", "kills": 12, "wins": 4, "losses": 1}],
                    "seasons": [{"season": 18, "mmr": 2850, "maxMmr": 2900}]
                }
            }
        });

        let stats = normalize(R6DB, &payload(R6DB, body)).unwrap();
        assert_eq!(stats.level(), Some(88));
        assert_eq!(stats.general().unwrap().played, Some(4));

        let ranked = stats.ranked().unwrap();
        assert_eq!(ranked.tier.unwrap().table, "steel-wave");
        assert_eq!(ranked.tier.unwrap().to_string(), "Gold II");
        assert_eq!(stats.operators()[0].name, "jager");
        assert_eq!(stats.operators()[0].played(), 5);
    }

    #[test]
    fn test_statsdb_without_payload_is_malformed() {
        let err = normalize(R6DB, &payload(R6DB, json!({"status": "ok"}))).unwrap_err();
        assert!(matches!(err, R6sError::MalformedResponse { .. }));
    }
}

mod ubisoft_tests {
    use super::*;

    fn ubisoft_body() -> Value {
        json!({
            "profile": {"profileId": "pid", "userId": "uid", "nameOnPlatform": "MacieJay"},
            "linked_accounts": null,
            "ranked": {
                "platform_families_full_profiles": [{
                    "platform_family": "pc",
                    "board_ids_full_profiles": [
                        {
                            "board_id": "casual",
                            "full_profiles": [{
                                "profile": {"rank_points": 2200, "season_id": 30},
                                "season_statistics": {
                                    "kills": 40, "deaths": 20,
                                    "match_outcomes": {"wins": 5, "losses": 4, "abandons": 1}
                                }
                            }]
                        },
                        {
                            "board_id": "ranked",
                            "full_profiles": [{
                                "profile": {"rank_points": 3450, "max_rank_points": 3600, "season_id": 30},
                                "season_statistics": {
                                    "kills": 100, "deaths": 50,
                                    "match_outcomes": {"wins": 12, "losses": 8, "abandons": 0}
                                }
                            }]
                        }
                    ]
                }]
            },
            "playtime": {
                "profiles": [{
                    "stats": {
                        "PPvPTimePlayed": {"value": "7200"},
                        "PClearanceLevel": {"value": "310"}
                    }
                }]
            },
            "progression": null,
            "persona": null
        })
    }

    #[test]
    fn test_ubisoft_boards_by_id() {
        let stats = normalize(UBISOFT, &payload(UBISOFT, ubisoft_body())).unwrap();

        assert_eq!(
            stats.identity().profile_id().map(|id| id.as_str()),
            Some("pid")
        );
        assert_eq!(stats.level(), Some(310));
        assert_eq!(stats.general().unwrap().time_played, Some(7200));

        let ranked = stats.ranked().unwrap();
        assert_eq!(ranked.played, Some(20));
        assert_eq!(ranked.tier.unwrap().to_string(), "Platinum I");

        let casual = stats.casual().unwrap();
        assert_eq!(casual.played, Some(10));
        assert_eq!(casual.mmr, Some(2200.0));

        assert_eq!(stats.seasons().len(), 1);
        assert_eq!(stats.seasons()[0].label(), "Y8S2");
    }

    fn with_ranked_board(rank_points: Value, outcomes: Value) -> Value {
        let mut body = ubisoft_body();
        let ranked = &mut body["ranked"]["platform_families_full_profiles"][0]
            ["board_ids_full_profiles"][1]["full_profiles"][0];
        ranked["profile"]["rank_points"] = rank_points;
        ranked["season_statistics"]["match_outcomes"] = outcomes;
        body
    }

    #[test]
    fn test_ubisoft_rank_points_scale() {
        let outcomes = json!({"wins": 1, "losses": 1});
        for (points, label) in [
            (999, "Copper V"),
            (1000, "Copper V"),
            (2600, "Gold IV"),
            (4200, "Diamond III"),
            (4499, "Diamond I"),
            (4500, "Champion"),
        ] {
            let body = with_ranked_board(json!(points), outcomes.clone());
            let stats = normalize(UBISOFT, &payload(UBISOFT, body)).unwrap();
            assert_eq!(
                stats.ranked().unwrap().tier.unwrap().to_string(),
                label,
                "rank points {points}"
            );
        }
    }

    #[test]
    fn test_ubisoft_huge_counters_saturate() {
        let body = with_ranked_board(
            json!(3000),
            json!({"wins": "1e20", "losses": "1", "abandons": "1e20"}),
        );
        let stats = normalize(UBISOFT, &payload(UBISOFT, body)).unwrap();

        let ranked = stats.ranked().unwrap();
        assert_eq!(ranked.won, Some(u64::MAX));
        assert_eq!(ranked.played, Some(u64::MAX));
        assert_eq!(stats.seasons()[0].win_rate().to_string(), "100.00%");
    }

    #[test]
    fn test_ubisoft_tolerates_failed_sub_requests() {
        let mut body = ubisoft_body();
        body["ranked"] = Value::Null;
        body["playtime"] = Value::Null;

        let stats = normalize(UBISOFT, &payload(UBISOFT, body)).unwrap();
        assert!(stats.ranked().is_none());
        assert!(stats.general().is_none());
        assert!(stats.level().is_none());
    }

    #[test]
    fn test_ubisoft_without_profile_is_malformed() {
        let err = normalize(UBISOFT, &payload(UBISOFT, json!({"profile": null}))).unwrap_err();
        assert!(matches!(err, R6sError::MalformedResponse { .. }));
    }
}

mod normalizer_tests {
    use super::*;

    #[test]
    fn test_unknown_source_is_invalid() {
        let err = normalize("siegegg", &payload(R6SCN, r6scn_body())).unwrap_err();
        match err {
            R6sError::InvalidSource { name } => assert_eq!(name, "siegegg"),
            other => panic!("Expected InvalidSource, got {other:?}"),
        }
    }

    #[test]
    fn test_default_registrations() {
        let normalizer = Normalizer::with_defaults();
        let sources: Vec<&str> = normalizer.sources().collect();
        assert_eq!(sources, vec!["r6db", "r6scn", "r6tracker", "ubisoft"]);
        assert_eq!(
            normalizer.mapping(R6DB).unwrap().table,
            TableVersion::SteelWave
        );
        assert_eq!(
            normalizer.mapping(UBISOFT).unwrap().mmr,
            MmrSourcing::default()
        );
    }

    #[test]
    fn test_settings_override_mmr_pointers() {
        let mut settings = Settings::default();
        settings.mmr_overrides.insert(
            R6SCN.to_string(),
            MmrSourcing {
                ranked: Some("/Basicstat/1/mmr".to_string()),
                casual: None,
            },
        );
        settings
            .mmr_overrides
            .insert("nowhere".to_string(), MmrSourcing::default());

        let normalizer = Normalizer::from_settings(&settings);
        let stats = normalizer
            .normalize(R6SCN, &payload(R6SCN, r6scn_body()))
            .unwrap();

        assert_eq!(stats.ranked().unwrap().mmr, Some(2100.0));
        assert_eq!(stats.ranked().unwrap().tier.unwrap().tier, Tier::Silver);
        // No casual pointer: StatCR carried none.
        assert_eq!(stats.casual().unwrap().mmr, None);
        assert!(stats.casual().unwrap().tier.is_none());
    }

    #[test]
    fn test_pointer_creates_missing_mode() {
        let mut body = r6scn_body();
        body["StatCR"] = json!([]);

        let stats = normalize(R6SCN, &payload(R6SCN, body)).unwrap();
        let ranked = stats.ranked().unwrap();
        assert_eq!(ranked.mmr, Some(3000.0));
        assert_eq!(ranked.kills, None);
    }

    #[test]
    fn test_resolve_pointer_reads_strings_and_numbers() {
        let body = json!({"a": {"b": "3,100"}, "c": [1.5]});
        assert_eq!(resolve_pointer(&body, "/a/b"), Some(3100.0));
        assert_eq!(resolve_pointer(&body, "/c/0"), Some(1.5));
        assert_eq!(resolve_pointer(&body, "/missing"), None);
    }

    #[test]
    fn test_custom_mapping_registration() {
        fn fixed(raw: &RawPayload) -> Result<PlayerStatisticsBuilder> {
            Ok(PlayerStatistics::builder(crate::stats::PlayerIdentity::new(
                raw.identifier.clone(),
                None,
                raw.platform,
            )))
        }

        let mut normalizer = Normalizer::empty();
        normalizer.register(
            "fixture",
            SourceMapping {
                map: fixed,
                table: TableVersion::Classic,
                mmr: MmrSourcing::new("/r", "/c"),
            },
        );
        let stats = normalizer
            .normalize("fixture", &payload("fixture", json!({"r": 4100})))
            .unwrap();
        assert_eq!(stats.ranked().unwrap().tier.unwrap().tier, Tier::Champion);
        assert!(stats.casual().is_none());
    }
}
