use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::str::SplitWhitespace;

use clap::Parser;
use session::mesh::{MeshHub, MeshTransport};
use session::session::Session;
use session::transport::{MediaError, MediaStream, PeerId};
use tabletop::token::TokenKind;
use tabletop::view::Point;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("terminal io failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "tavolo-cli", about = "Hosts tabletop participants on an in-process mesh")]
struct Cli {
    #[arg(long, env = "TAVOLO_PARTICIPANTS", default_value_t = 2)]
    participants: usize,

    #[arg(long, env = "TAVOLO_NAME", default_value = "Giocatore")]
    name: String,

    #[arg(long, env = "TAVOLO_NO_MEDIA", default_value_t = false)]
    no_media: bool,

    #[arg(long, default_value_t = 800.0)]
    width: f64,

    #[arg(long, default_value_t = 600.0)]
    height: f64,
}

struct Participant {
    session: Session<MeshTransport>,
    /// Chat entries already printed to the terminal.
    printed: usize,
}

struct Table {
    participants: Vec<Participant>,
    active: usize,
}

impl Table {
    fn active(&self) -> &Session<MeshTransport> {
        &self.participants[self.active].session
    }

    fn active_mut(&mut self) -> &mut Session<MeshTransport> {
        &mut self.participants[self.active].session
    }
}

enum Upload {
    Map,
    Rules,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let hub = MeshHub::new();
    let count = cli.participants.max(1);
    let mut table = Table { participants: Vec::with_capacity(count), active: 0 };
    for number in 1..=count {
        let (transport, inbox) = hub.join();
        let media = if cli.no_media {
            Err(MediaError("media disabled".to_owned()))
        } else {
            Ok(MediaStream::new(format!("{}-{number}", cli.name)))
        };
        let mut session = Session::new(transport, inbox, media);
        session.set_viewport(cli.width, cli.height);
        session.register();
        table.participants.push(Participant { session, printed: 0 });
    }
    pump(&mut table);

    println!("hosting {count} participants; :help lists commands, :quit exits");
    flush_chat(&mut table);
    repl(&mut table)
}

fn repl(table: &mut Table) -> Result<(), CliError> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();
    prompt(table)?;
    loop {
        line.clear();
        let bytes = reader.read_line(&mut line)?;
        if bytes == 0 {
            break;
        }
        if !handle_line(table, line.trim()) {
            break;
        }
        pump(table);
        flush_chat(table);
        prompt(table)?;
    }
    Ok(())
}

/// Dispatches one input line. Returns `false` when the REPL should exit.
fn handle_line(table: &mut Table, line: &str) -> bool {
    if line.is_empty() {
        return true;
    }
    if !line.starts_with(':') {
        table.active_mut().send_chat(line);
        return true;
    }

    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or_default();
    match command {
        ":help" => print_help(),
        ":quit" | ":q" => return false,
        ":switch" | ":p" => switch(table, words.next()),
        ":id" => match table.active().local_id() {
            Some(id) => println!("{id}"),
            None => println!("not registered yet"),
        },
        ":connect" => connect(table, words.next()),
        ":token" => match words.next() {
            Some("pc") => table.active_mut().add_token(TokenKind::Pc),
            Some("enemy") => table.active_mut().add_token(TokenKind::Enemy),
            _ => println!("usage: :token pc|enemy"),
        },
        ":tokens" => list_tokens(table.active()),
        ":drag" => drag(table, &mut words),
        ":zoom" => match words.next() {
            Some("in") => table.active_mut().zoom_in(),
            Some("out") => table.active_mut().zoom_out(),
            Some("reset") => table.active_mut().reset_view(),
            _ => println!("usage: :zoom in|out|reset"),
        },
        ":viewport" => viewport(table, &mut words),
        ":map" => upload(table, words.next(), Upload::Map),
        ":rules" => upload(table, words.next(), Upload::Rules),
        ":find" => {
            let query = words.collect::<Vec<_>>().join(" ");
            find_rules(table.active(), &query);
        }
        ":mic" => report_toggle("mic", table.active_mut().toggle_mic()),
        ":cam" => report_toggle("cam", table.active_mut().toggle_cam()),
        ":peers" => list_peers(table.active()),
        ":leave" => table.active_mut().leave(),
        other => println!("unknown command {other}; :help lists commands"),
    }
    true
}

fn switch(table: &mut Table, target: Option<&str>) {
    match target.map(str::parse::<usize>) {
        Some(Ok(number)) if (1..=table.participants.len()).contains(&number) => {
            table.active = number - 1;
            println!("active participant: p{number}");
        }
        _ => println!("usage: :switch <1..={}>", table.participants.len()),
    }
}

fn connect(table: &mut Table, target: Option<&str>) {
    let Some(target) = target else {
        println!("usage: :connect <participant-number|peer-id>");
        return;
    };
    // A bare number means another hosted participant; anything else is
    // treated as a raw transport identifier.
    let remote = match target.parse::<usize>() {
        Ok(number) if (1..=table.participants.len()).contains(&number) => {
            match table.participants[number - 1].session.local_id() {
                Some(id) => id.clone(),
                None => {
                    println!("participant p{number} is not registered yet");
                    return;
                }
            }
        }
        _ => PeerId::new(target),
    };
    table.active_mut().connect_to(&remote);
}

fn drag(table: &mut Table, words: &mut SplitWhitespace<'_>) {
    let (Some(id), Some(dx), Some(dy)) = (words.next(), words.next(), words.next()) else {
        println!("usage: :drag <token-id> <dx> <dy>");
        return;
    };
    let (Ok(dx), Ok(dy)) = (dx.parse::<f64>(), dy.parse::<f64>()) else {
        println!("usage: :drag <token-id> <dx> <dy>");
        return;
    };
    let session = table.active_mut();
    let Some((x, y)) = session.board().token(id).map(|token| (token.x, token.y)) else {
        println!("no token {id}");
        return;
    };
    let view = session.board().view;
    // Press just inside the token's top-left corner, as a mouse would.
    let start = view.world_to_screen(Point::new(x + 1.0, y + 1.0));
    session.pointer_down(start);
    session.pointer_move(Point::new(start.x + dx, start.y + dy));
    session.pointer_up();
}

fn viewport(table: &mut Table, words: &mut SplitWhitespace<'_>) {
    let parsed = (words.next().map(str::parse::<f64>), words.next().map(str::parse::<f64>));
    let (Some(Ok(width)), Some(Ok(height))) = parsed else {
        println!("usage: :viewport <width> <height>");
        return;
    };
    table.active_mut().set_viewport(width, height);
}

fn upload(table: &mut Table, path: Option<&str>, kind: Upload) {
    let Some(path) = path else {
        match kind {
            Upload::Map => println!("usage: :map <image-file>"),
            Upload::Rules => println!("usage: :rules <file>"),
        }
        return;
    };
    match fs::read(path) {
        Ok(bytes) => {
            let name = Path::new(path).file_name().and_then(|name| name.to_str()).unwrap_or(path);
            let session = table.active_mut();
            match kind {
                Upload::Map => session.load_map(name, &bytes),
                Upload::Rules => session.import_rules(name, &bytes),
            }
        }
        Err(error) => println!("cannot read {path}: {error}"),
    }
}

fn find_rules(session: &Session<MeshTransport>, query: &str) {
    let rules = session.search_rules(query);
    if rules.is_empty() {
        println!("Nessun risultato.");
        return;
    }
    for rule in rules {
        let title = if rule.title.is_empty() { "Senza Titolo" } else { rule.title.as_str() };
        println!("  {title}: {}", rule.text);
    }
}

fn list_tokens(session: &Session<MeshTransport>) {
    let board = session.board();
    if board.tokens.is_empty() {
        println!("no tokens");
        return;
    }
    for token in board.tokens.iter() {
        println!("  {} [{}] at ({:.1}, {:.1})", token.id, token.kind.glyph(), token.x, token.y);
    }
}

fn list_peers(session: &Session<MeshTransport>) {
    if session.links().is_empty() && session.calls().is_empty() {
        println!("no peers");
        return;
    }
    for link in session.links().iter() {
        let state = if link.is_open() { "open" } else { "closed" };
        println!("  link {} to {} ({state})", link.id(), link.remote());
    }
    for call in session.calls().iter() {
        let state = if call.stream.is_some() { "streaming" } else { "pending" };
        println!("  call {} with {} ({state})", call.id, call.remote);
    }
}

fn report_toggle(device: &str, enabled: Option<bool>) {
    match enabled {
        Some(true) => println!("{device} on"),
        Some(false) => println!("{device} off"),
        None => println!("no media stream"),
    }
}

/// Drains every participant's inbox until a full pass moves nothing.
/// Answering a call queues events for the caller, so one pass is not enough.
fn pump(table: &mut Table) {
    loop {
        let mut handled = 0;
        for participant in &mut table.participants {
            handled += participant.session.poll();
        }
        if handled == 0 {
            break;
        }
    }
}

fn flush_chat(table: &mut Table) {
    for (index, participant) in table.participants.iter_mut().enumerate() {
        let number = index + 1;
        for entry in participant.session.chat().iter().skip(participant.printed) {
            if entry.is_system() {
                println!("[p{number}] * {}", entry.body);
            } else {
                println!("[p{number}] {}: {}", entry.display_author(), entry.body);
            }
        }
        participant.printed = participant.session.chat().len();
    }
}

fn prompt(table: &Table) -> Result<(), CliError> {
    print!("p{}> ", table.active + 1);
    io::stdout().flush()?;
    Ok(())
}

fn print_help() {
    println!("commands:");
    println!("  :switch <n>           make participant n active (alias :p)");
    println!("  :id                   print the active participant's peer id");
    println!("  :connect <n|id>       link the active participant to another");
    println!("  :token pc|enemy       place a token at the viewport center");
    println!("  :tokens               list tokens on the active board");
    println!("  :drag <id> <dx> <dy>  drag a token by a screen-pixel delta");
    println!("  :zoom in|out|reset    adjust the local view transform");
    println!("  :viewport <w> <h>     set the local viewport size");
    println!("  :map <file>           load a shared map image");
    println!("  :rules <file>         import compendium rules");
    println!("  :find <query>         search imported rules");
    println!("  :mic / :cam           toggle local media tracks");
    println!("  :peers                list links and calls");
    println!("  :leave                close every link and call");
    println!("  :quit                 exit");
    println!("anything else is sent to chat; /roll <n>d<m> rolls dice");
}
