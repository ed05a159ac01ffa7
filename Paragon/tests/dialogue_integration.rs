//! End-to-end tests over the public dialogue API

use std::collections::HashSet;
use std::mem;

use paragon::dialogue::quick_script;
use paragon::prelude::*;
use pretty_assertions::assert_eq;

const SAMPLE_GAME: &str = r"$t1$WmAlice|3$WmBob|7$w0|$WsAlice|$WaHello there!$k\n$p$WsBob|$Wa$E笑,汗|Hi $Nu, $G彼,彼女|.$k$p$Svpvoice_01|$SbpBGM_01|30|$c255,0,0,255|Red$a0$k$Wd";

const SAMPLE_PRETTY: &str = "\
$SetConversationType(1)
$LoadAssets(Alice, 3)
$LoadAssets(Bob, 7)
$Wait(0)
$SetSpeaker(Alice)
$Synchronize
Hello there!
$Pause

\\n
$Clear
$SetSpeaker(Bob)
$Synchronize
$Emotions(笑,汗)
Hi $Nu, $G(彼,彼女).
$Pause

$Clear
$PlayVoice(voice_01)
$PlayMusic(BGM_01,30)
$c(255,0,0,255)Red$a(0)
$Pause

$DeleteSpeaker
";

/// One occurrence of every command the game notation can express.
const EVERY_COMMAND_GAME: &str = concat!(
    "$t1$WmAlice|3$WmBob|h$w0|$Z$C$Wf$Bbe$Bbsx,y,z|$Sev1|2|$bBattle|$lRing|",
    "$Tcfx01|$Tdfx02|$Fw30|$Fo20|$Fi10|",
    "$WsAlice|$Wa$Wv$Wc$VFfid_alice|$VNStranger|$E笑,汗|",
    r"Hi $Nu and $Np, $Nl0 $G彼,彼女|$a1 $c1,2,3,4|Red\n$Np!$k$p",
    "$Svpv1|$Svjv2|$Svev3|$Sspse1|$Sswse2|$SbpBGM|30|$Sbs15|$Sbv80|5|",
    "$Sre1|$SrpTension|90|$SlpRamp|60|$SlsRamp|0|$SlvRamp|50|10|",
    "$a$k$Wd",
);

fn parse_game(text: &str) -> Vec<Command> {
    GameScriptParser::new().scan(text).unwrap()
}

fn parse_pretty(text: &str) -> Vec<Command> {
    PrettyScriptParser::new().scan(text).unwrap()
}

#[test]
fn test_has_permanents_to_pretty() {
    let commands = parse_game("$a");
    assert_eq!(commands, vec![Command::HasPermanents]);
    assert_eq!(commands[0].to_pretty(), "$HasPermanents");
}

#[test]
fn test_conversation_type_to_pretty() {
    let commands = parse_game("$t1");
    assert_eq!(commands, vec![Command::SetConversationType(1)]);
    assert_eq!(commands[0].to_pretty(), "$SetConversationType(1)");
}

#[test]
fn test_pause_to_game() {
    let commands = parse_pretty("$Pause");
    assert_eq!(commands, vec![Command::Pause]);
    assert_eq!(commands[0].to_game(), "$k");
}

#[test]
fn test_quick_transcript_two_speakers() {
    let commands = quick_script::parse(
        "Alice: Hello there!\nBob: Hi Alice!",
        "Alice",
        0,
        "Bob",
        6,
        false,
        30,
    )
    .unwrap();
    assert_eq!(
        commands,
        vec![
            Command::SetConversationType(1),
            Command::load_assets("Alice", 0),
            Command::load_assets("Bob", 6),
            Command::Wait(0),
            Command::set_speaker("Alice"),
            Command::Synchronize,
            Command::print("Hello there!"),
            Command::Pause,
            Command::Newline,
            Command::set_speaker("Bob"),
            Command::Synchronize,
            Command::print("Hi Alice!"),
            Command::Pause,
        ]
    );
}

#[test]
fn test_quick_to_pretty() {
    let pretty = quick_to_pretty("Alice: Hi\nAlice: Bye", "Alice", 3, "Bob", 7, false, 30).unwrap();
    assert_eq!(
        pretty,
        "$SetConversationType(1)\n$LoadAssets(Alice, 3)\n$LoadAssets(Bob, 7)\n$Wait(0)\n\
         $SetSpeaker(Alice)\n$Synchronize\nHi\n$Pause\n\n$Clear\nBye\n$Pause\n\n"
    );
    // The generated pretty script is valid input for the pretty parser.
    assert!(pretty_to_game(&pretty, None, None).is_ok());
}

#[test]
fn test_prints_on_one_line_concatenate() {
    let commands = vec![
        Command::load_assets("A", 0),
        Command::set_speaker("A"),
        Command::print("Hi"),
        Command::print("Hi"),
        Command::print("Hi"),
    ];
    let mut state = DialogueInterpreterState::default();
    state.run(&commands);
    assert_eq!(state.current().top[0], "HiHiHi");
    assert!(state.snapshots().is_empty());
}

#[test]
fn test_full_box_auto_clears_before_third_line() {
    let commands = vec![
        Command::load_assets("A", 0),
        Command::set_speaker("A"),
        Command::print("Hi"),
        Command::Newline,
        Command::print("Hi"),
        Command::Newline,
        Command::print("Hi"),
    ];
    let mut state = DialogueInterpreterState::default();
    state.run(&commands);

    assert_eq!(state.snapshots().len(), 1);
    assert_eq!(state.snapshots()[0].top, ["Hi".to_string(), "Hi".to_string()]);
    assert_eq!(state.current().top, ["Hi".to_string(), String::new()]);
    assert_eq!(state.current().top_line, 0);
}

#[test]
fn test_game_round_trip() {
    let commands = parse_game(SAMPLE_GAME);
    assert_eq!(commands_to_game(&commands), SAMPLE_GAME);
}

#[test]
fn test_game_to_pretty_sample() {
    assert_eq!(game_to_pretty(SAMPLE_GAME, None, None).unwrap(), SAMPLE_PRETTY);
}

#[test]
fn test_full_cycle_is_stable() {
    let pretty = game_to_pretty(SAMPLE_GAME, None, None).unwrap();
    let game = pretty_to_game(&pretty, None, None).unwrap();
    assert_eq!(game, SAMPLE_GAME);
    assert_eq!(game_to_pretty(&game, None, None).unwrap(), pretty);
    assert_eq!(parse_pretty(&pretty), parse_game(SAMPLE_GAME));
}

#[test]
fn test_every_command_survives_full_cycle() {
    let commands = parse_game(EVERY_COMMAND_GAME);
    let variants: HashSet<_> = commands.iter().map(mem::discriminant).collect();
    assert_eq!(variants.len(), 48);
    assert_eq!(commands_to_game(&commands), EVERY_COMMAND_GAME);

    let pretty = game_to_pretty(EVERY_COMMAND_GAME, None, None).unwrap();
    for line in [
        "$LoadAssets(Bob, h)",
        "$Bbs(x,y,z)",
        "$Sev(1,2)",
        "$Bev{Battle}",
        "$Marriage(Ring)",
        "$VisualEffect2(fx02)",
        "$FadeWhite(30)",
        "$FidAlias(fid_alice)",
        r"Hi $Nu and $Np, $Nl(0) $G(彼,彼女)$a(1) $c(1,2,3,4)Red\n",
        "$Np!",
        "$SetRampVolume(Ramp,50,10)",
        "$HasPermanents",
    ] {
        assert!(pretty.lines().any(|l| l == line), "missing {line:?} in\n{pretty}");
    }

    assert_eq!(parse_pretty(&pretty), commands);
    assert_eq!(pretty_to_game(&pretty, None, None).unwrap(), EVERY_COMMAND_GAME);
}

#[test]
fn test_pipe_after_param_does_not_survive_reserialization() {
    // `$a` reads digits greedily and the stray `|` is dropped on output.
    let commands = parse_game("$a0|5");
    assert_eq!(commands, vec![Command::Param(0), Command::print("5")]);
    let game = commands_to_game(&commands);
    assert_eq!(game, "$a05");
    assert_eq!(parse_game(&game), vec![Command::Param(5)]);
}

#[test]
fn test_blank_run_before_inline_command_is_dropped() {
    let commands = parse_game("$Wa $a0$k");
    assert_eq!(commands[1], Command::print(" "));

    let pretty = game_to_pretty("$Wa $a0$k", None, None).unwrap();
    assert_eq!(pretty, "$Synchronize\n $a(0)\n$Pause\n\n");
    assert_eq!(pretty_to_game(&pretty, None, None).unwrap(), "$Wa$a0$k");
}

#[test]
fn test_translate_round_trip() {
    let mut translations = Translations::default();
    translations.assets.insert("Alice".to_string(), "アリス".to_string());
    translations.emotions.insert("Happy".to_string(), "笑".to_string());
    let inverted = translations.inverted();

    let game = "$Wmアリス|3$Wsアリス|$E笑,汗|";
    let pretty = game_to_pretty(game, Some(&inverted.assets), Some(&inverted.emotions)).unwrap();
    assert_eq!(pretty, "$LoadAssets(Alice, 3)\n$SetSpeaker(Alice)\n$Emotions(Happy,汗)\n");

    let back = pretty_to_game(&pretty, Some(&translations.assets), Some(&translations.emotions)).unwrap();
    assert_eq!(back, game);
}

#[test]
fn test_translate_with_empty_tables_is_noop() {
    let mut commands = parse_game(SAMPLE_GAME);
    let before = commands.clone();
    let empty = TranslationTable::new();
    translate(&mut commands, Some(&empty), Some(&empty));
    assert_eq!(commands, before);
}

#[test]
fn test_unknown_prefix_is_an_error() {
    let err = GameScriptParser::new().scan("Hello$Wx").unwrap_err();
    assert_eq!(err.message, "Unrecognized command Wx.");
    assert_eq!((err.line, err.column), (1, 6));
    assert!(game_to_pretty("Hello$Wx", None, None).is_err());
}

#[test]
fn test_interpreter_ignores_unloaded_speaker() {
    // A speaker that was never loaded swallows text and attribute changes.
    let commands = parse_game("$WsGhost|$E笑|$VNAlias|Boo$k");
    let snapshots = interpret(&commands, &AvatarConfig::default());
    assert!(snapshots.is_empty());
}

#[test]
fn test_preview_sample() {
    let avatar = AvatarConfig {
        name: Some("Corrin".to_string()),
        gender: Gender::Male,
    };
    let snapshots = interpret(&parse_game(SAMPLE_GAME), &avatar);
    assert_eq!(snapshots.len(), 3);
    assert_eq!(snapshots[0].bottom_text(), "Hello there!\n");
    assert_eq!(snapshots[1].bottom_text(), "Hi Corrin, 彼.\n");
    assert_eq!(snapshots[1].active_speaker().unwrap().emotions, vec!["笑", "汗"]);
    assert_eq!(snapshots[2].bottom_text(), "Red$a0\n");
}

#[test]
fn test_snapshots_serialize_to_json() {
    let snapshots = interpret(&parse_game(SAMPLE_GAME), &AvatarConfig::default());
    let json = serde_json::to_string(&snapshots).unwrap();
    let parsed: Vec<DialogueSnapshot> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, snapshots);
}
