use maze_pathfinding::{Editor, MazeGenerator, StepControl, DEFAULT_ROWS};

// Drives an editor the way a front end would: place endpoints and a wall, solve, then replace
// everything with a maze and stop the carve halfway to show an animation being interrupted.

fn main() {
    let mut editor = Editor::new(8).unwrap();
    editor.select(0, 0).unwrap();
    editor.select(7, 7).unwrap();
    for row in 0..7 {
        editor.select(row, 4).unwrap();
    }
    let mut frames = 0;
    let result = editor
        .solve(|_, _| {
            frames += 1;
            StepControl::Continue
        })
        .unwrap();
    println!("{} steps, {} frames", result.len(), frames);
    println!("{}", editor.grid());

    editor.maze_generator = MazeGenerator::seeded(7);
    let mut carved = 0;
    let maze = editor.generate_maze(|_, _| {
        carved += 1;
        if carved < 20 {
            StepControl::Continue
        } else {
            StepControl::Stop
        }
    });
    println!("Carve complete: {}, {} passages", maze.complete, maze.len());
    println!("{}", editor.grid());

    let editor = Editor::new(DEFAULT_ROWS).unwrap();
    println!("Default session is {0}x{0}", editor.grid().rows());
}
