use std::fs::File;
use std::io;
use std::io::Write;
use std::path::Path;

const CONFIG_SAMPLE: &str = r#"[site]
title = "TechGlobe"
tagline = "Web development, programming tutorials and tech insights"

# For the file locations, If you want it to be relative to the executable directory
# use ${exe_dir}/location
[paths]
template_dir = "res/template"
public_dir = "res/public"

[defaults]
related_limit = 3
toc_offset = 100.0
rendering_cache_enabled = true

[server]
address = "0.0.0.0"
port = 8001

# Without this section the server logs to the console
# [log]
# level = "Info"
# log_to_console = true
# location = "/var/log/techglobe/server.log"

[subscribe]
delay_ms = 1500

[comments]
default_author = "You"

# [ads]
# client = "ca-pub-0000000000000000"
# home_slot = "0000000000"
# article_slot = "0000000000"
# search_slot = "0000000000"
"#;

pub(crate) fn write_sample_cfg(file_path: &Path) -> io::Result<()> {
    let mut file = File::create(file_path)?;
    file.write_all(CONFIG_SAMPLE.as_bytes())
}
