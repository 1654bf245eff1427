use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wml_parser::Parser;
use wml_scanner::Scanner;

// A unit definition (~80 lines) exercising most constructs
const WML_SOURCE: &str = r#"#textdomain wesnoth-units
# Elvish fighter line
#define UNIT_BODY_ELVISH_FIGHTER_GRAPHICS MOVING_IMAGE
    [standing_anim]
        start_time=0
        [frame]
            image="units/elves-wood/fighter.png:150,units/elves-wood/fighter-idle.png:150"
        [/frame]
    [/standing_anim]
    [movement_anim]
        [frame]
            image="units/elves-wood/{MOVING_IMAGE}.png:150"
        [/frame]
    [/movement_anim]
#enddef

[unit_type]
    id=Elvish Fighter
    name= _ "Elvish Fighter"
    race=elf
    image="units/elves-wood/fighter.png"
    profile="portraits/elves/fighter.png~FL()~RC(magenta>red)"
    hitpoints=33
    movement_type=woodland
    movement=5
    experience=40
    level=1
    alignment=neutral
    advances_to=Elvish Captain,Elvish Hero
    cost=14
    usage=fighter
    description= _ "Elves are not well suited to the brute-force style of combat"
        + _ " that dwarves and humans often favor."
    die_sound={SOUND_LIST:ELF_HIT}
    {DEFENSE_ANIM "units/elves-wood/fighter-defend.png" "units/elves-wood/fighter.png" {SOUND_LIST:ELF_HIT} }
    {UNIT_BODY_ELVISH_FIGHTER_GRAPHICS fighter-moving}
#ifdef EASY
    hitpoints=40
#else
    hitpoints=30
#endif
    [attack]
        name=sword
        description= _ "sword"
        icon=attacks/sword-elven.png
        type=blade
        range=melee
        damage=5
        number=4
        [filter_second]
            direction=n,ne,se
        [/filter_second]
    [/attack]
    [attack]
        name=bow
        description= _ "bow"
        type=pierce
        range=ranged
        damage=3
        number=3
    [/attack]
    [event]
        name=prestart
        [lua]
            code=<<
                local units = wesnoth.units.find_on_map { side = 1 }
                for i, u in ipairs(units) do u.hitpoints = u.max_hitpoints end
            >>
        [/lua]
        [set_variable]
            name=progress
            value=0~100:300,100~0:300
            args=[a b c]
        [/set_variable]
    [/event]
[/unit_type]
"#;

fn bench_parse_wml(c: &mut Criterion) {
    c.bench_function("parse_wml_unit", |b| {
        b.iter(|| {
            let parser = Parser::new("bench.cfg", black_box(WML_SOURCE));
            let result = parser.parse();
            black_box(result);
        });
    });
}

fn bench_scan_wml(c: &mut Criterion) {
    c.bench_function("scan_wml_unit", |b| {
        b.iter(|| {
            let count = Scanner::new("bench.cfg", black_box(WML_SOURCE)).count();
            black_box(count);
        });
    });
}

criterion_group!(benches, bench_parse_wml, bench_scan_wml);
criterion_main!(benches);
