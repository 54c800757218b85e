mod training_tests;
