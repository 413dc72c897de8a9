use proptest::prelude::*;
use skinny_config::convert::parse_int;
use skinny_config::{
    apply_configuration, ApplyContext, ChangeKind, ConfigStore, Device, Disposition, GlobalConfig,
    LiveRegistry, SoftKeyMode,
};

fn codec_names() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(
        prop::sample::select(vec!["alaw", "ulaw", "g722", "g729", "gsm", "h264", "all", "bogus"]),
        0..6,
    )
}

proptest! {
    #[test]
    fn decimal_integers_parse(value in any::<i32>()) {
        prop_assert_eq!(parse_int(&value.to_string()), Some(i64::from(value)));
    }

    #[test]
    fn second_application_is_idle(
        keepalive in 1u32..3600,
        servername in "[A-Za-z][A-Za-z0-9 ]{0,30}",
        allow in codec_names(),
        tzoffset in -12i32..=12,
    ) {
        let text = format!(
            "[general]\nkeepalive = {keepalive}\nservername = {servername}\nallow = {allow}\n\
             [SEP1]\ntype = device\ndevicetype = 7960\ntzoffset = {tzoffset}\n",
            allow = allow.join(","),
        );
        let source = ConfigStore::parse(&text).unwrap();

        let mut global = GlobalConfig::default();
        let ctx = ApplyContext::new(&source, "general");
        apply_configuration(&mut global, &ctx);
        let again = apply_configuration(&mut global, &ctx);
        prop_assert!(!again.changed());
        prop_assert_eq!(again.change, ChangeKind::NoUpdateNeeded);

        let mut device = Device::new("SEP1");
        let ctx = ApplyContext::new(&source, "SEP1");
        apply_configuration(&mut device, &ctx);
        prop_assert_eq!(device.keepalive, keepalive);
        prop_assert_eq!(device.tzoffset, tzoffset);
        prop_assert!(!apply_configuration(&mut device, &ctx).changed());
    }

    #[test]
    fn invalid_values_never_stop_the_pass(garbage in "[a-z]{1,8}", keepalive in 1u32..600) {
        let text = format!(
            "[general]\nearlyrtp = x{garbage}\nkeepalive = {keepalive}\nsccp_cos = {garbage}\n"
        );
        let source = ConfigStore::parse(&text).unwrap();
        let mut global = GlobalConfig::default();
        let report = apply_configuration(&mut global, &ApplyContext::new(&source, "general"));

        prop_assert_eq!(global.keepalive, keepalive);
        prop_assert_eq!(report.outcome("earlyrtp").unwrap().disposition, Disposition::Invalid);
        prop_assert_eq!(report.outcome("sccp_cos").unwrap().disposition, Disposition::Invalid);
    }

    #[test]
    fn softkey_rows_never_exceed_capacity(keys in prop::collection::vec("[a-z]{1,10}", 0..40)) {
        let mode = SoftKeyMode::parse(&keys.join(","));
        prop_assert!(mode.count() <= skinny_config::softkey::MAX_KEYS_PER_MODE);
        prop_assert_eq!(mode.count(), keys.len().min(skinny_config::softkey::MAX_KEYS_PER_MODE));
    }

    #[test]
    fn reload_reset_list_has_no_duplicates(port in 2001u16..3000, label in "[A-Z][a-z]{2,10}") {
        let base = "[general]\n\
                    [SEP1]\ntype = device\ndevicetype = 7960\nbutton = line, 100\nbutton = line, 101\n\
                    [100]\ntype = line\nlabel = A\ncid_name = A\ncid_num = 100\n\
                    [101]\ntype = line\nlabel = B\ncid_name = B\ncid_num = 101\n";
        let registry = LiveRegistry::new();
        registry.load(&ConfigStore::parse(base).unwrap()).unwrap();

        let changed = base
            .replace("[general]\n", &format!("[general]\nport = {port}\n"))
            .replace("label = A", &format!("label = {label}"))
            .replace("label = B", &format!("label = {label}x"));
        let outcome = registry.reload(&ConfigStore::parse(&changed).unwrap()).unwrap();
        prop_assert_eq!(outcome.devices_to_reset, vec!["SEP1".to_string()]);
    }
}
