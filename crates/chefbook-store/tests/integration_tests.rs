//! Integration tests for the profile store

use chefbook_store::prelude::*;
use chefbook_test_helpers::prelude::*;
use std::sync::Arc;
use tempfile::TempDir;

fn fresh_store() -> ProfileStore {
    ProfileStore::new(Arc::new(ProfileTable::new()))
}

mod lifecycle {
    use super::*;

    #[test]
    fn test_full_lifecycle() -> TestResult {
        let store = fresh_store();
        let ana = identity("ana");

        store.create(&ana, chef_ana())?;
        assert_eq!(store.retrieve_signature_dishes(&ana)?, vec!["Lasagna"]);

        store.update_name(&ana, "Ana Rossi")?;
        store.upgrade_recipe_collection(&ana, items("Risotto", 3))?;

        let profile = store.retrieve_full(&ana)?;
        assert_eq!(profile.chef_name(), "Ana Rossi");
        assert_eq!(profile.recipe_collection().len(), 3);
        assert_eq!(profile.cuisine_specialties(), ["Italian".to_string()]);

        store.delete(&ana)?;
        assert_eq!(
            store.retrieve_full(&ana).map_err(|e| e.kind()),
            Err(ErrorKind::NotFound)
        );
        Ok(())
    }

    #[test]
    fn test_create_twice_is_rejected() -> TestResult {
        let store = fresh_store();
        let ana = identity("ana");
        store.create(&ana, chef_ana())?;

        let err = store.create(&ana, valid_fields("Other", 10));
        assert_eq!(err, Err(StoreError::already_exists("ana")));
        assert_eq!(store.retrieve_full(&ana)?.chef_name(), "Chef Ana");
        Ok(())
    }

    #[test]
    fn test_delete_then_recreate() -> TestResult {
        let store = fresh_store();
        let ana = identity("ana");
        store.create(&ana, chef_ana())?;
        store.delete(&ana)?;

        assert_eq!(store.delete(&ana), Err(StoreError::not_found("ana")));
        store.create(&ana, valid_fields("Ana Again", 3))?;
        assert_eq!(store.retrieve_full(&ana)?.chef_name(), "Ana Again");
        Ok(())
    }

    #[test]
    fn test_owners_are_isolated() -> TestResult {
        let store = fresh_store();
        let ana = identity("ana");
        let bo = identity("bo");
        store.create(&ana, chef_ana())?;
        store.create(&bo, valid_fields("Chef Bo", 12))?;

        store.delete(&bo)?;

        assert!(store.contains(&ana));
        assert!(!store.contains(&bo));
        assert_eq!(store.len(), 1);
        Ok(())
    }
}

mod field_limits {
    use super::*;

    #[test]
    fn test_experience_boundaries() {
        let store = fresh_store();

        for (level, accepted) in [(1, false), (2, true), (75, true), (76, false)] {
            let caller = identity(&format!("chef-{level}"));
            let result = store.create(&caller, valid_fields("Chef", level));
            assert_eq!(result.is_ok(), accepted, "experience level {level}");
            assert_eq!(store.contains(&caller), accepted);
        }
    }

    #[test]
    fn test_modify_below_minimum_experience_keeps_record() -> TestResult {
        let store = fresh_store();
        let ana = identity("ana");
        store.create(&ana, chef_ana())?;

        let below_minimum = chef_ana().with_dishes(["Lasagna", "Tiramisu"]);
        let below_minimum = ProfileFields {
            experience_level: 1,
            ..below_minimum
        };
        let err = store.modify(&ana, below_minimum);

        assert_eq!(
            err,
            Err(StoreError::InvalidInput(
                FieldViolation::experience_out_of_range(1, 2, 75)
            ))
        );
        assert_eq!(store.retrieve_full(&ana)?.fields(), &chef_ana());
        Ok(())
    }

    #[test]
    fn test_recipe_upgrade_counts() -> TestResult {
        let store = fresh_store();
        let ana = identity("ana");
        store.create(&ana, chef_ana())?;

        let err = store.upgrade_recipe_collection(&ana, Vec::new());
        assert_eq!(err, Err(StoreError::InvalidInput(FieldViolation::EmptyRecipes)));

        store.upgrade_recipe_collection(&ana, items("Recipe", 5))?;
        assert_eq!(store.retrieve_recipe_collection(&ana)?.len(), 5);

        let err = store.upgrade_recipe_collection(&ana, items("Recipe", 6));
        assert_eq!(
            err,
            Err(StoreError::InvalidInput(FieldViolation::too_many_items(
                ListField::RecipeCollection,
                6,
                5
            )))
        );
        assert_eq!(store.retrieve_recipe_collection(&ana)?, items("Recipe", 5));
        Ok(())
    }

    #[test]
    fn test_dish_and_specialty_limits() {
        let store = fresh_store();

        let too_many_dishes = chef_ana().with_dishes(items("Dish", 6));
        let err = store.create(&identity("ana"), too_many_dishes);
        assert_eq!(
            err.map_err(|e| e.violation().cloned()),
            Err(Some(FieldViolation::too_many_items(
                ListField::SignatureDishes,
                6,
                5
            )))
        );

        let long_specialty = chef_ana().with_specialties(["x".repeat(51)]);
        let err = store.create(&identity("ana"), long_specialty);
        assert_eq!(
            err.map_err(|e| e.kind()),
            Err(ErrorKind::InvalidInput)
        );

        assert!(store.is_empty());
    }

    #[test]
    fn test_name_limits() -> TestResult {
        let store = fresh_store();
        let ana = identity("ana");

        let err = store.create(&ana, chef_ana().with_name(""));
        assert_eq!(err, Err(StoreError::InvalidInput(FieldViolation::EmptyName)));

        // create only requires a non-empty name
        store.create(&ana, chef_ana().with_name("Al"))?;

        let err = store.update_name(&ana, "n".repeat(101));
        assert_eq!(
            err,
            Err(StoreError::InvalidInput(FieldViolation::NameTooLong {
                actual: 101,
                max: 100
            }))
        );
        store.update_name(&ana, "n".repeat(100))?;
        Ok(())
    }
}

mod restore {
    use super::*;

    #[test]
    fn test_restore_inserts_when_absent() -> TestResult {
        let store = fresh_store();
        let ana = identity("ana");

        let confirmation = store.restore_from_backup(&ana, chef_ana())?;
        assert_eq!(confirmation.operation, Operation::RestoreFromBackup);
        assert_eq!(store.retrieve_full(&ana)?.fields(), &chef_ana());
        Ok(())
    }

    #[test]
    fn test_restore_overwrites_and_is_idempotent() -> TestResult {
        let store = fresh_store();
        let ana = identity("ana");
        store.create(&ana, valid_fields("Old Name", 30))?;

        store.restore_from_backup(&ana, chef_ana())?;
        let first = store.list_profiles();
        store.restore_from_backup(&ana, chef_ana())?;

        assert_eq!(store.list_profiles(), first);
        assert_eq!(store.len(), 1);
        assert_eq!(store.retrieve_full(&ana)?.chef_name(), "Chef Ana");
        Ok(())
    }

    #[test]
    fn test_invalid_restore_keeps_existing_record() -> TestResult {
        let store = fresh_store();
        let ana = identity("ana");
        store.create(&ana, chef_ana())?;

        let err = store.restore_from_backup(&ana, valid_fields("Chef Ana", 76));
        assert_eq!(err.map_err(|e| e.kind()), Err(ErrorKind::InvalidInput));
        assert_eq!(store.retrieve_full(&ana)?.experience_level(), 5);
        Ok(())
    }
}

mod not_found {
    use super::*;

    #[test]
    fn test_every_operation_reports_missing_profile() {
        let store = fresh_store();
        let ghost = identity("ghost");
        let expected = Err(ErrorKind::NotFound);

        assert_eq!(store.modify(&ghost, chef_ana()).map(drop).map_err(|e| e.kind()), expected);
        assert_eq!(store.delete(&ghost).map(drop).map_err(|e| e.kind()), expected);
        assert_eq!(
            store.update_name(&ghost, "Ghost Chef").map(drop).map_err(|e| e.kind()),
            expected
        );
        assert_eq!(
            store
                .upgrade_recipe_collection(&ghost, items("Recipe", 1))
                .map(drop)
                .map_err(|e| e.kind()),
            expected
        );
        assert_eq!(store.retrieve_full(&ghost).map(drop).map_err(|e| e.kind()), expected);
        assert_eq!(
            store.retrieve_cuisine_specialties(&ghost).map(drop).map_err(|e| e.kind()),
            expected
        );
        assert_eq!(
            store.retrieve_signature_dishes(&ghost).map(drop).map_err(|e| e.kind()),
            expected
        );
        assert_eq!(
            store.retrieve_recipe_collection(&ghost).map(drop).map_err(|e| e.kind()),
            expected
        );

        assert!(store.is_empty());
    }

    #[test]
    fn test_missing_profile_is_checked_before_fields() {
        let store = fresh_store();
        let ghost = identity("ghost");

        let err = store.modify(&ghost, chef_ana().with_name(""));
        assert_eq!(err, Err(StoreError::not_found("ghost")));

        let err = store.update_name(&ghost, "");
        assert_eq!(err, Err(StoreError::not_found("ghost")));
    }

    #[test]
    fn test_failed_call_leaves_table_unchanged() -> TestResult {
        let store = fresh_store();
        store.create(&identity("ana"), chef_ana())?;
        let before = store.list_profiles();

        let _ = store.modify(&identity("ghost"), chef_ana());
        let _ = store.modify(&identity("ana"), valid_fields("Chef Ana", 0));
        let _ = store.update_name(&identity("ana"), "A");
        let _ = store.create(&identity("bo"), valid_fields("Chef Bo", 99));

        assert_eq!(store.list_profiles(), before);
        Ok(())
    }
}

mod reads {
    use super::*;

    #[test]
    fn test_anyone_can_read_any_profile() -> TestResult {
        let store = fresh_store();
        let ana = identity("ana");
        store.create(&ana, chef_ana())?;

        // reads are keyed by target, no caller involved
        assert_eq!(store.retrieve_cuisine_specialties(&ana)?, vec!["Italian"]);
        assert_eq!(store.retrieve_signature_dishes(&ana)?, vec!["Lasagna"]);
        assert_eq!(store.retrieve_recipe_collection(&ana)?, vec!["Carbonara"]);
        Ok(())
    }

    #[test]
    fn test_list_profiles_is_ordered() -> TestResult {
        let store = fresh_store();
        for owner in ["zoe", "ana", "mia"] {
            store.create(&identity(owner), valid_fields(owner, 10))?;
        }

        let owners: Vec<String> = store
            .list_profiles()
            .iter()
            .map(|p| p.owner().to_string())
            .collect();
        assert_eq!(owners, vec!["ana", "mia", "zoe"]);
        Ok(())
    }
}

mod endorsement {
    use super::*;

    #[test]
    fn test_endorsement_checks() -> TestResult {
        let store = fresh_store();
        let ana = identity("ana");
        let bo = identity("bo");
        store.create(&ana, chef_ana())?;

        assert_eq!(
            store.endorse_chef(&ana, &bo, "lovely").map_err(|e| e.kind()),
            Err(ErrorKind::NotFound)
        );

        store.create(&bo, valid_fields("Chef Bo", 20))?;
        let confirmation = store.endorse_chef(&ana, &bo, "lovely")?;
        assert_eq!(confirmation.operation, Operation::EndorseChef);

        assert_eq!(
            store.endorse_chef(&bo, &bo, "me").map_err(|e| e.kind()),
            Err(ErrorKind::InvalidInput)
        );
        Ok(())
    }
}

mod concurrency {
    use super::*;

    #[test]
    fn test_concurrent_creates_for_one_owner() {
        let store = fresh_store();
        let ana = identity("ana");

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                let ana = ana.clone();
                std::thread::spawn(move || {
                    store.create(&ana, valid_fields(&format!("Ana {i}"), 10))
                })
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| must(h.join()))
            .filter(Result::is_ok)
            .count();

        assert_eq!(successes, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_concurrent_creates_for_many_owners() {
        let store = fresh_store();

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store.create(&identity(&format!("chef-{i}")), valid_fields("Chef", 10))
                })
            })
            .collect();

        for handle in handles {
            must(must(handle.join()));
        }
        assert_eq!(store.len(), 16);
    }
}

mod persistence {
    use super::*;

    #[tokio::test]
    async fn test_store_survives_reload() -> TestResult {
        let temp_dir = TempDir::new()?;
        let config = SnapshotConfig::new(temp_dir.path().join("chefbook.json"));

        let storage = FileStorage::new(config.clone()).await?;
        let store = storage.load_store().await?;
        store.create(&identity("ana"), chef_ana())?;
        store.create(&identity("bo"), valid_fields("Chef Bo", 20))?;
        storage.save_store(&store).await?;
        drop(storage);

        let storage = FileStorage::new(config).await?;
        let reloaded = storage.load_store().await?;
        assert_eq!(reloaded.list_profiles(), store.list_profiles());
        assert_eq!(reloaded.retrieve_signature_dishes(&identity("ana"))?, vec!["Lasagna"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_nested_snapshot_directory_is_created() -> TestResult {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("data").join("kitchen").join("chefbook.json");

        let storage = FileStorage::new(SnapshotConfig::new(&path)).await?;
        storage.save_store(&fresh_store()).await?;

        assert!(path.exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_owner_snapshot_is_rejected() -> TestResult {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("chefbook.json");
        let record = r#"{
            "owner": "ana",
            "chef_name": "Chef Ana",
            "experience_level": 5,
            "cuisine_specialties": ["Italian"],
            "signature_dishes": ["Lasagna"],
            "recipe_collection": ["Carbonara"]
        }"#;
        std::fs::write(
            &path,
            format!(r#"{{"schema_version": 1, "profiles": [{record}, {record}]}}"#),
        )?;

        let storage = FileStorage::new(SnapshotConfig::new(&path)).await?;
        let err = match storage.load_store().await {
            Ok(_) => panic!("duplicate owners must be rejected"),
            Err(err) => err,
        };
        assert!(
            err.chain()
                .any(|cause| cause.to_string().contains("Duplicate profile owner"))
        );
        Ok(())
    }
}
