use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ziwei_base::{
    BaziQuadruple, ChartConfig, ChartInput, CompleteChart, Gender, Palace, Star, derive_pillars,
    hour_branch, lunar_to_solar, solar_to_lunar,
};
use ziwei_config::resolve_config;

#[derive(Parser)]
#[command(name = "ziwei", about = "Zi Wei Dou Shu chart CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a natal chart
    Chart {
        /// Birth date (YYYY-MM-DD), solar unless --lunar
        #[arg(long)]
        date: String,
        /// Birth hour (0-23)
        #[arg(long)]
        hour: i32,
        /// male or female
        #[arg(long)]
        gender: String,
        /// Date is a lunar date
        #[arg(long)]
        lunar: bool,
        /// Birth falls in a leap month
        #[arg(long)]
        leap: bool,
        /// Path to a TOML config (defaults to $ZIWEI_CONFIG)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Convert between solar and lunar dates
    Lunar {
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Treat the date as lunar and convert to solar
        #[arg(long)]
        to_solar: bool,
        /// Lunar date is in the leap month (with --to-solar)
        #[arg(long)]
        leap: bool,
    },
    /// Four pillars of a solar birth moment
    Pillars {
        /// Solar date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Hour (0-23)
        #[arg(long)]
        hour: i32,
    },
    /// Decade, annual and monthly overlays for a target year
    Overlay {
        /// Birth date (YYYY-MM-DD), solar unless --lunar
        #[arg(long)]
        date: String,
        /// Birth hour (0-23)
        #[arg(long)]
        hour: i32,
        /// male or female
        #[arg(long)]
        gender: String,
        /// Date is a lunar date
        #[arg(long)]
        lunar: bool,
        /// Birth falls in a leap month
        #[arg(long)]
        leap: bool,
        /// Path to a TOML config (defaults to $ZIWEI_CONFIG)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Target year
        #[arg(long)]
        year: u16,
        /// Target lunar month (1-12)
        #[arg(long)]
        month: Option<u8>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn parse_date(s: &str) -> Result<(i32, u8, u8), String> {
    let parts: Vec<&str> = s.split('-').collect();
    if parts.len() != 3 {
        return Err(format!("expected YYYY-MM-DD, got {s}"));
    }
    let year: i32 = parts[0].parse().map_err(|e| format!("{e}"))?;
    let month: u8 = parts[1].parse().map_err(|e| format!("{e}"))?;
    let day: u8 = parts[2].parse().map_err(|e| format!("{e}"))?;
    Ok((year, month, day))
}

fn require_date(s: &str) -> (i32, u8, u8) {
    parse_date(s).unwrap_or_else(|e| {
        eprintln!("Invalid date {s}: {e}");
        std::process::exit(1);
    })
}

fn parse_gender(s: &str) -> Gender {
    match s.to_lowercase().as_str() {
        "male" | "m" => Gender::Male,
        "female" | "f" => Gender::Female,
        _ => {
            eprintln!("Invalid gender: {s}");
            eprintln!("Valid: male, female");
            std::process::exit(1);
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> ChartConfig {
    resolve_config(path.map(|p| p.as_path())).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}");
        std::process::exit(1);
    })
}

fn build_chart(
    date: &str,
    hour: i32,
    gender: &str,
    lunar: bool,
    leap: bool,
    config: Option<&PathBuf>,
) -> CompleteChart {
    let (year, month, day) = require_date(date);
    let gender = parse_gender(gender);
    let input = if lunar {
        ChartInput::lunar(year, month, day, hour, gender)
    } else {
        ChartInput::solar(year, month, day, hour, gender)
    }
    .with_leap_month(leap);
    let config = load_config(config);
    ziwei_base::compute_chart_with_config(&input, &config).unwrap_or_else(|e| {
        eprintln!("Chart error: {e}");
        std::process::exit(1);
    })
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => {
            eprintln!("JSON error: {e}");
            std::process::exit(1);
        }
    }
}

fn format_star(star: &Star) -> String {
    let mut out = star.id.chinese().to_string();
    if let Some(b) = star.brightness {
        out.push_str(&format!("({})", b.chinese()));
    }
    if let Some(t) = star.natal_transform {
        out.push_str(&format!("[{}]", t.chinese()));
    }
    if let Some(t) = star.self_transform {
        out.push_str(&format!("[self {}]", t.chinese()));
    }
    out
}

fn print_palace(palace: &Palace) {
    let stars: Vec<String> = palace.stars.iter().map(format_star).collect();
    let body = if palace.is_body { " (body)" } else { "" };
    let period = palace
        .major_period
        .map(|p| format!(" {}-{}", p.start_age, p.end_age))
        .unwrap_or_default();
    let overlays: Vec<String> = [
        palace.decade_overlay.map(|n| format!("decade {n}")),
        palace.annual_overlay.map(|n| format!("year {n}")),
        palace.monthly_overlay.map(|n| format!("month {n}")),
        palace.minor_overlay.map(|n| format!("minor {n}")),
    ]
    .into_iter()
    .flatten()
    .collect();
    let overlays = if overlays.is_empty() {
        String::new()
    } else {
        format!(" <{}>", overlays.join(", "))
    };
    println!(
        "{}{} {:<9}{}{}{}  {}",
        palace.stem,
        palace.branch,
        palace.name.name(),
        body,
        period,
        overlays,
        stars.join(" ")
    );
}

fn print_chart_header(chart: &CompleteChart) {
    println!("Solar:    {}", chart.birth.solar);
    println!("Lunar:    {}", chart.birth.lunar);
    println!("Pillars:  {}", chart.bazi);
    println!(
        "Life:     {}  Body: {}  Lai-Yin: {}",
        chart.life_palace, chart.body_palace, chart.lai_yin_palace
    );
    println!("Bureau:   {} ({})", chart.bureau, chart.bureau.chinese());
    println!(
        "Rulers:   life {}  body {}",
        chart.life_star.chinese(),
        chart.body_star.chinese()
    );
    let sihua: Vec<String> = chart
        .natal_transforms()
        .iter()
        .map(|(s, t)| format!("{}{}", s.chinese(), t.chinese()))
        .collect();
    println!("Sihua:    {}", sihua.join(" "));
}

fn print_pillars(bazi: &BaziQuadruple) {
    println!("Year:  {} ({})", bazi.year, bazi.year.nayin_name());
    println!("Month: {} ({})", bazi.month, bazi.month.nayin_name());
    println!("Day:   {} ({})", bazi.day, bazi.day.nayin_name());
    println!("Hour:  {} ({})", bazi.hour, bazi.hour.nayin_name());
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Chart {
            date,
            hour,
            gender,
            lunar,
            leap,
            config,
            json,
        } => {
            let chart = build_chart(&date, hour, &gender, lunar, leap, config.as_ref());
            if json {
                print_json(&chart);
            } else {
                print_chart_header(&chart);
                println!();
                for palace in &chart.palaces {
                    print_palace(palace);
                }
            }
        }

        Commands::Lunar {
            date,
            to_solar,
            leap,
        } => {
            let (year, month, day) = require_date(&date);
            if to_solar {
                match lunar_to_solar(year, month, day, leap) {
                    Ok(solar) => println!("{solar}"),
                    Err(e) => {
                        eprintln!("Conversion error: {e}");
                        std::process::exit(1);
                    }
                }
            } else {
                match solar_to_lunar(year, month, day) {
                    Ok(lunar) => {
                        println!("{lunar}");
                        println!("Day pillar: {}", lunar.day_pillar);
                    }
                    Err(e) => {
                        eprintln!("Conversion error: {e}");
                        std::process::exit(1);
                    }
                }
            }
        }

        Commands::Pillars { date, hour } => {
            let (year, month, day) = require_date(&date);
            let result = hour_branch(hour).and_then(|branch| {
                let lunar = solar_to_lunar(year, month, day)?;
                let bazi = derive_pillars(lunar, branch);
                Ok(if ziwei_base::is_late_zi(hour) {
                    bazi.with_day_rollover()
                } else {
                    bazi
                })
            });
            match result {
                Ok(bazi) => print_pillars(&bazi),
                Err(e) => {
                    eprintln!("Pillar error: {e}");
                    std::process::exit(1);
                }
            }
        }

        Commands::Overlay {
            date,
            hour,
            gender,
            lunar,
            leap,
            config,
            year,
            month,
            json,
        } => {
            let chart = build_chart(&date, hour, &gender, lunar, leap, config.as_ref());
            let overlay = chart.overlay(year, month).unwrap_or_else(|e| {
                eprintln!("Overlay error: {e}");
                std::process::exit(1);
            });
            let palaces = chart.overlaid_palaces(&overlay);
            if json {
                print_json(&(&overlay, &palaces));
            } else {
                println!(
                    "Year:     {} ({}), nominal age {}",
                    year, overlay.annual.pillar, overlay.nominal_age
                );
                match overlay.decade {
                    Some(d) => println!(
                        "Decade:   {}-{} at {} ({})",
                        d.start_age, d.end_age, d.branch, d.pillar
                    ),
                    None => println!("Decade:   none"),
                }
                match overlay.minor {
                    Some(m) => println!("Minor:    {} (natal {})", m.branch, m.natal_palace),
                    None => println!("Minor:    none"),
                }
                println!(
                    "Annual:   life at {} (natal {})",
                    overlay.annual.life_branch, overlay.annual.natal_palace
                );
                if let Some(m) = overlay.monthly {
                    println!(
                        "Month {}:  {} life at {} (natal {})",
                        m.month, m.pillar, m.life_branch, m.natal_palace
                    );
                }
                println!();
                for palace in &palaces {
                    print_palace(palace);
                }
            }
        }
    }
}
