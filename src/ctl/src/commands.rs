use crate::cli::{Cli, Command};
use anyhow::{Context, Result, bail};
use boostplus_catalog::{
    AspectRatio, Resolution, display_string, native_dimensions, resnap_index, resolutions_for,
};
use boostplus_hooks::EngineConfig;
use boostplus_locator::{InMemoryCorpus, Locator, MethodSignature};
use boostplus_prefs::{PolicyKey, PolicyStore, PolicyValue, ValueKind, apply_uri};
use log::{debug, info};
use std::path::Path;
use std::str::FromStr;
use strum::IntoEnumIterator;

pub fn run(args: Cli) -> Result<()> {
    match args.command {
        Command::Get { key } => {
            let store = open_store(&args.prefs, &args.config)?;
            match key {
                Some(key) => println!("{}", store.get(parse_key(&key)?)),
                None => {
                    for key in PolicyKey::iter() {
                        println!("{key} = {}", store.get(key));
                    }
                }
            }
        }
        Command::Set {
            key,
            value,
            width,
            height,
        } => {
            let store = open_store(&args.prefs, &args.config)?;
            let key = parse_key(&key)?;
            let value = parse_value(key, &value)?;

            match (key, value) {
                (PolicyKey::AspectRatio, PolicyValue::Int(index)) => {
                    set_aspect_ratio(&store, index, native_dimensions(width, height))?
                }
                _ => store.set(key, value)?,
            }
        }
        Command::ApplyUri { uri } => {
            let store = open_store(&args.prefs, &args.config)?;
            let applied = apply_uri(&store, &uri)?;
            println!("applied {applied} overrides");
        }
        Command::Resolutions {
            width,
            height,
            aspect,
        } => print_resolutions(width, height, aspect)?,
        Command::Locate {
            corpus,
            self_strings,
            caller_strings,
        } => locate(&corpus, self_strings, caller_strings)?,
    }

    Ok(())
}

fn open_store(
    prefs: &Option<impl AsRef<Path>>,
    config: &Option<impl AsRef<Path>>,
) -> Result<PolicyStore> {
    let mut engine = match config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    if let Some(path) = prefs {
        engine.prefs_path = path.as_ref().into();
    }

    debug!("using policy file {}", engine.prefs_path.display());
    Ok(engine.operator_store())
}

/// Stores a new profile index and moves the resolution to the nearest entry it offers.
fn set_aspect_ratio(store: &PolicyStore, index: i32, native: Resolution) -> Result<()> {
    let list = |index| resolutions_for(AspectRatio::from_index(index), native);

    let previous = store.get_int(PolicyKey::AspectRatio, -1);
    let selected = store.get_int(PolicyKey::Resolution, 0);
    let next = list(index);
    let snapped = resnap_index(&list(previous), selected, &next, native.width);

    store.set_int(PolicyKey::AspectRatio, index)?;
    store.set_int(PolicyKey::Resolution, snapped)?;

    if let Some(entry) = next.get(snapped as usize) {
        info!("resolution moved to index {snapped}, {entry}");
    }
    Ok(())
}

fn parse_key(name: &str) -> Result<PolicyKey> {
    PolicyKey::from_str(name).with_context(|| {
        let known: Vec<_> = PolicyKey::iter().map(PolicyKey::name).collect();
        format!("unknown policy `{name}`, expected one of {}", known.join(", "))
    })
}

fn parse_value(key: PolicyKey, raw: &str) -> Result<PolicyValue> {
    let value = match key.kind() {
        ValueKind::Bool => match raw {
            "true" | "1" | "on" => PolicyValue::Bool(true),
            "false" | "0" | "off" => PolicyValue::Bool(false),
            _ => bail!("`{key}` takes a boolean, got {raw:?}"),
        },
        ValueKind::Int => PolicyValue::Int(
            raw.parse()
                .with_context(|| format!("`{key}` takes an integer, got {raw:?}"))?,
        ),
    };
    Ok(value)
}

fn print_resolutions(width: i32, height: i32, aspect: Option<i32>) -> Result<()> {
    let profile = match aspect {
        Some(index) => Some(AspectRatio::from_index(index).with_context(|| {
            format!(
                "aspect ratio index {index} out of range 0..{}",
                AspectRatio::count()
            )
        })?),
        None => None,
    };

    let native = native_dimensions(width, height);
    println!(
        "native {native}, profile {}",
        profile.map_or("native", AspectRatio::label)
    );

    for (index, entry) in resolutions_for(profile, native).into_iter().enumerate() {
        let is_native = index == 0 && profile.is_none();
        println!("{index:>2}  {}", display_string(entry, is_native, native.width));
    }
    Ok(())
}

fn locate(corpus: &Path, self_strings: Vec<String>, caller_strings: Vec<String>) -> Result<()> {
    if self_strings.is_empty() {
        bail!("at least one --self-string is required");
    }

    let corpus = InMemoryCorpus::from_file(corpus)?;
    let signature = MethodSignature::new()
        .using_strings(self_strings)
        .caller_using_strings(caller_strings);

    let locator = Locator::new(&corpus);
    for method in locator.find(&signature) {
        println!("{}  {}", method.id, method.descriptor);
    }

    let unique = locator.find_unique(&signature)?;
    println!("unique match: {}", unique.descriptor);
    Ok(())
}
