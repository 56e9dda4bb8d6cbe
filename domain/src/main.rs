use std::env;
use std::process;

use domain::adapters::memory_repo::InMemoryRepo;
use domain::service::CoffeeService;
use domain::validate::parse_size;
use domain::{CoffeeError, CoffeeId, Size};

fn print_usage() {
    eprintln!(
        "{}\n\nUsage:\n  domain list\n  domain get <id>\n  domain create <name> [--size <size>]\n  domain update <id> <name> [--size <size>]\n  domain delete <id>\n\nNotes:\n  - Sizes: SHORT, TALL, GRANDE, VENTI (case-insensitive). Default: TALL.\n  - This demo CLI uses an in-memory repository seeded with the fixed menu;\n    data is not persisted across runs.",
        domain::about()
    );
}

fn parse_id(s: &str) -> Result<CoffeeId, String> {
    s.parse::<CoffeeId>()
        .map_err(|_| format!("invalid id: {}", s))
}

// Parse a single optional `--size <val>` flag from the remaining args.
fn parse_size_flag(rest: &[String]) -> Result<Size, String> {
    let mut size = Size::Tall;
    let mut i = 0;
    while i < rest.len() {
        match rest[i].as_str() {
            "--size" => {
                if i + 1 >= rest.len() {
                    return Err("--size requires a value".into());
                }
                size = parse_size(&rest[i + 1]).map_err(|e| e.to_string())?;
                i += 2;
            }
            unk => {
                return Err(format!("unknown argument: {}", unk));
            }
        }
    }
    Ok(size)
}

fn run() -> Result<(), String> {
    let mut args = env::args().skip(1); // skip program name

    let Some(cmd) = args.next() else {
        print_usage();
        return Ok(());
    };

    // Construct a demo service over the seeded in-memory catalog
    let svc = CoffeeService::new(InMemoryRepo::with_seed_menu());

    match cmd.as_str() {
        "list" => {
            for coffee in svc.find_all().map_err(|e| e.to_string())? {
                println!("{}\t{}\t{}", coffee.id, coffee.size.as_str(), coffee.name);
            }
            Ok(())
        }
        "get" => {
            let Some(id_str) = args.next() else {
                return Err("missing <id> for get".into());
            };
            let id = parse_id(&id_str)?;
            match svc.find_one(id).map_err(|e| e.to_string())? {
                Some(coffee) => {
                    println!("{}\t{}\t{}", coffee.id, coffee.size.as_str(), coffee.name);
                    Ok(())
                }
                None => Err("not found".into()),
            }
        }
        "create" => {
            let Some(name) = args.next() else {
                return Err("missing <name> for create".into());
            };
            let rest: Vec<String> = args.collect();
            let size = parse_size_flag(&rest)?;
            match svc.create(&name, size) {
                Ok(coffee) => {
                    println!("created: {} ({} {})", coffee.id, coffee.size.as_str(), coffee.name);
                    Ok(())
                }
                Err(e) => Err(format!("create failed: {}", e)),
            }
        }
        "update" => {
            let Some(id_str) = args.next() else {
                return Err("missing <id> for update".into());
            };
            let Some(name) = args.next() else {
                return Err("missing <name> for update".into());
            };
            let id = parse_id(&id_str)?;
            let rest: Vec<String> = args.collect();
            let size = parse_size_flag(&rest)?;
            match svc.update(id, &name, size) {
                Ok(coffee) => {
                    println!("updated: {} ({} {})", coffee.id, coffee.size.as_str(), coffee.name);
                    Ok(())
                }
                Err(CoffeeError::NotFound) => Err("not found".into()),
                Err(e) => Err(format!("update failed: {}", e)),
            }
        }
        "delete" => {
            let Some(id_str) = args.next() else {
                return Err("missing <id> for delete".into());
            };
            let id = parse_id(&id_str)?;
            match svc.delete(id) {
                Ok(coffee) => {
                    println!("deleted: {} ({})", coffee.id, coffee.name);
                    Ok(())
                }
                Err(CoffeeError::NotFound) => Err("not found".into()),
                Err(e) => Err(format!("delete failed: {}", e)),
            }
        }
        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn main() {
    if let Err(msg) = run() {
        eprintln!("error: {}", msg);
        process::exit(1);
    }
}
