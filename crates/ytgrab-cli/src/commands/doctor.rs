use anyhow::Result;
use std::process::Command;
use which::which;

pub async fn run() -> Result<()> {
    println!("ytgrab dependency check\n");

    let mut all_ok = true;

    // Check yt-dlp
    print!("yt-dlp:  ");
    match which("yt-dlp") {
        Ok(path) => {
            let version = Command::new(&path).arg("--version").output();
            match version {
                Ok(out) => {
                    let v = String::from_utf8_lossy(&out.stdout);
                    println!("OK ({})", v.trim());
                }
                Err(_) => {
                    println!("FOUND but failed to get version");
                    all_ok = false;
                }
            }
        }
        Err(_) => {
            println!("NOT FOUND");
            println!("         Install from https://github.com/yt-dlp/yt-dlp");
            all_ok = false;
        }
    }

    // ffmpeg is only required for audio extraction
    print!("ffmpeg:  ");
    match which("ffmpeg") {
        Ok(path) => {
            let version = Command::new(&path).args(["-version"]).output();
            match version {
                Ok(out) => {
                    let first_line = String::from_utf8_lossy(&out.stdout)
                        .lines()
                        .next()
                        .unwrap_or("")
                        .to_string();
                    let version_part = first_line.split_whitespace().nth(2).unwrap_or("unknown");
                    println!("OK ({})", version_part);
                }
                Err(_) => {
                    println!("FOUND but failed to get version");
                    all_ok = false;
                }
            }
        }
        Err(_) => {
            println!("NOT FOUND (needed for `ytgrab audio`)");
            all_ok = false;
        }
    }

    if all_ok {
        println!("\nAll dependencies OK");
    } else {
        println!("\nSome dependencies are missing");
    }

    Ok(())
}
