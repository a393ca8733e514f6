use std::io::Write;

use jyotish::place::{
    CountryTable, NearestPlaceZones, PlaceDatabase, PlaceFormat, PlaceLoadError, PlaceResolution, PlaceResolver,
};

#[test]
fn test_paris_is_ambiguous_with_france_first() {
    let resolver = PlaceResolver::new(PlaceDatabase::bundled());
    match resolver.resolve("Paris") {
        PlaceResolution::Ambiguous { candidates } => {
            assert_eq!(candidates[0], "Paris, FR");
            // The two US records collapse into one candidate
            assert_eq!(candidates.iter().filter(|c| *c == "Paris, US").count(), 1);
            assert_eq!(candidates, vec!["Paris, FR", "Paris, US", "Paris, CA"]);
        }
        other => panic!("expected ambiguity, got {:?}", other),
    }
}

#[test]
fn test_qualified_names_resolve() {
    let resolver = PlaceResolver::new(PlaceDatabase::bundled());

    let loc = resolver.resolve("Paris, France");
    let loc = loc.location().expect("Paris, France should resolve");
    assert_eq!(loc.name, "Paris, FR");
    assert_eq!(loc.timezone, "Europe/Paris");

    let loc = resolver.resolve("novo mesto, slovenija");
    assert_eq!(loc.location().map(|l| l.timezone.as_str()), Some("Europe/Ljubljana"));

    let loc = resolver.resolve("Kathmandu, Nepal");
    assert_eq!(loc.location().map(|l| l.timezone.as_str()), Some("Asia/Kathmandu"));
}

#[test]
fn test_duplicate_records_count_as_one_candidate() {
    // Three Springfields in the bundled list, all US
    let resolver = PlaceResolver::new(PlaceDatabase::bundled());
    let res = resolver.resolve("Springfield, USA");
    let loc = res.location().expect("deduplicated to a single candidate");
    assert_eq!(loc.name, "Springfield, US");
    // The most populous one is kept (Missouri)
    assert!((loc.latitude - 37.21533).abs() < 1e-9);
}

#[test]
fn test_resolution_is_idempotent() {
    let resolver = PlaceResolver::new(PlaceDatabase::bundled());
    for text in ["Ljubljana", "  LJUBLJANA , Slovenia ", "Paris", "London", "Hyderabad", "nowhere at all", ""] {
        assert_eq!(resolver.resolve(text), resolver.resolve(text), "{:?}", text);
    }
    assert_eq!(resolver.resolve("ljubljana, si"), resolver.resolve("  LJUBLJANA , Slovenia "));
}

#[test]
fn test_ambiguity_is_ordered_by_population() {
    let db = PlaceDatabase::bundled();
    let resolver = PlaceResolver::new(db);
    for text in ["London", "Hyderabad", "Paris"] {
        let PlaceResolution::Ambiguous { candidates } = resolver.resolve(text) else {
            panic!("{} should be ambiguous", text);
        };
        let populations: Vec<u64> = candidates
            .iter()
            .map(|c| {
                db.records()
                    .iter()
                    .filter(|r| &r.display_name() == c)
                    .map(|r| r.population)
                    .max()
                    .unwrap()
            })
            .collect();
        assert!(populations.windows(2).all(|w| w[0] >= w[1]), "{}: {:?}", text, populations);
    }
}

#[test]
fn test_unknown_country_code_passes_through() {
    let resolver = PlaceResolver::new(PlaceDatabase::bundled());
    assert!(resolver.resolve("Graz, AT").is_resolved());
    assert!(resolver.resolve("Graz, at").is_resolved());
    assert_eq!(resolver.resolve("Graz, Narnia"), PlaceResolution::NotFound);
}

#[test]
fn test_custom_country_table() {
    let db = PlaceDatabase::bundled();
    let mut countries = CountryTable::with_defaults();
    countries.insert("Kranjska", "SI");
    let resolver = PlaceResolver::with_parts(db, &countries, NearestPlaceZones::new(db));
    assert!(resolver.resolve("Kranj, Kranjska").is_resolved());
}

#[test]
fn test_load_csv_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "name,country_code,latitude,longitude,population,timezone").unwrap();
    writeln!(file, "Ljubljana,SI,46.05108,14.50513,284355,Europe/Ljubljana").unwrap();
    writeln!(file, "Ljubljana,US,40.0,-80.0,12,America/New_York").unwrap();
    file.flush().unwrap();

    let db = PlaceDatabase::load(file.path(), PlaceFormat::Csv).unwrap();
    assert_eq!(db.len(), 2);
    let resolver = PlaceResolver::new(&db);
    assert_eq!(
        resolver.resolve("Ljubljana"),
        PlaceResolution::Ambiguous {
            candidates: vec!["Ljubljana, SI".to_string(), "Ljubljana, US".to_string()],
        }
    );
}

#[test]
fn test_load_geonames_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "3239318\tMaribor\tMaribor\tMarburg\t46.55472\t15.64667\tP\tPPLA\tSI\t\t01\t\t\t\t95171\t\t275\tEurope/Ljubljana\t2019-09-05"
    )
    .unwrap();
    file.flush().unwrap();

    let db = PlaceDatabase::load(file.path(), PlaceFormat::Geonames).unwrap();
    let resolver = PlaceResolver::new(&db);
    let res = resolver.resolve("Maribor, Slovenia");
    assert_eq!(res.location().map(|l| l.timezone.as_str()), Some("Europe/Ljubljana"));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = PlaceDatabase::load(&dir.path().join("missing.csv"), PlaceFormat::Csv).unwrap_err();
    assert!(matches!(err, PlaceLoadError::Io { .. }));
}

#[test]
fn test_partial_name_with_country() {
    let resolver = PlaceResolver::new(PlaceDatabase::bundled());
    let novo = resolver.resolve("Novo, Slovenia");
    assert_eq!(novo.location().map(|l| l.name.as_str()), Some("Novo Mesto, SI"));
    assert_eq!(resolver.resolve("Novo"), novo);
    assert_eq!(resolver.resolve("Mesto, Slovenia"), novo);
    assert_eq!(resolver.resolve("Graz, A"), PlaceResolution::NotFound);
}
